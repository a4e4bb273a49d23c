// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   build     : train / validation datasets
//   build-test: test dataset
//   shuffle   : generate the shuffle index used by `build`
//
// Each *Args struct converts into an application config, so
// clap types stop at this layer.

use clap::{Args, Subcommand};

use crate::application::{
    build_use_case::BuildConfig,
    shuffle_use_case::ShuffleConfig,
    test_use_case::TestConfig,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build train and validation loaders from a labeled corpus
    Build(BuildArgs),

    /// Build the test loader from an unlabeled corpus
    BuildTest(TestArgs),

    /// Write a random shuffle index for a labeled corpus
    Shuffle(ShuffleArgs),
}

/// Vocabulary files shared by `build` and `build-test`.
#[derive(Args, Debug)]
pub struct VocabArgs {
    /// JSON map from token to index
    #[arg(long, default_value = "data/word2idx.json")]
    pub word2idx_path: String,

    /// JSON map from index to token
    #[arg(long, default_value = "data/idx2word.json")]
    pub idx2word_path: String,
}

/// Fixed sequence lengths shared by all commands that encode text.
#[derive(Args, Debug)]
pub struct LengthArgs {
    /// Articles are truncated or padded to this many characters
    #[arg(long, default_value_t = 500)]
    pub max_article_len: usize,

    /// Questions are truncated or padded to this many characters
    #[arg(long, default_value_t = 50)]
    pub max_question_len: usize,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Labeled corpus (JSON array of articles)
    #[arg(long, default_value = "data/train.json")]
    pub train_file: String,

    #[command(flatten)]
    pub vocab: VocabArgs,

    #[command(flatten)]
    pub lengths: LengthArgs,

    /// Shuffle index produced by the `shuffle` command
    #[arg(long, default_value = "data/shuffle_idx.json")]
    pub shuffle_idx_path: String,

    /// Keep corpus order instead of applying the shuffle index
    #[arg(long)]
    pub no_shuffle: bool,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 32)]
    pub valid_batch_size: usize,

    /// Hold out one tenth of the examples for validation
    #[arg(long)]
    pub with_valid: bool,

    /// Which tenth to hold out (0-9)
    #[arg(long, default_value_t = 0)]
    pub model_id: usize,

    /// Write a JSON summary of the build to this path
    #[arg(long)]
    pub report: Option<String>,
}

impl From<BuildArgs> for BuildConfig {
    fn from(a: BuildArgs) -> Self {
        BuildConfig {
            train_file:       a.train_file,
            word2idx_path:    a.vocab.word2idx_path,
            idx2word_path:    a.vocab.idx2word_path,
            shuffle_idx_path: (!a.no_shuffle).then_some(a.shuffle_idx_path),
            max_article_len:  a.lengths.max_article_len,
            max_question_len: a.lengths.max_question_len,
            batch_size:       a.batch_size,
            valid_batch_size: a.valid_batch_size,
            with_valid:       a.with_valid,
            model_id:         a.model_id,
            report_path:      a.report,
        }
    }
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Unlabeled corpus (JSON array of articles)
    #[arg(long, default_value = "data/test.json")]
    pub test_file: String,

    #[command(flatten)]
    pub vocab: VocabArgs,

    #[command(flatten)]
    pub lengths: LengthArgs,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,
}

impl From<TestArgs> for TestConfig {
    fn from(a: TestArgs) -> Self {
        TestConfig {
            test_file:        a.test_file,
            word2idx_path:    a.vocab.word2idx_path,
            idx2word_path:    a.vocab.idx2word_path,
            max_article_len:  a.lengths.max_article_len,
            max_question_len: a.lengths.max_question_len,
            batch_size:       a.batch_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShuffleArgs {
    #[arg(long, default_value = "data/train.json")]
    pub train_file: String,

    /// Must match the value later passed to `build`
    #[arg(long, default_value_t = 500)]
    pub max_article_len: usize,

    #[arg(long, default_value = "data/shuffle_idx.json")]
    pub output: String,

    /// Seed for a reproducible permutation
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<ShuffleArgs> for ShuffleConfig {
    fn from(a: ShuffleArgs) -> Self {
        ShuffleConfig {
            train_file:      a.train_file,
            max_article_len: a.max_article_len,
            output:          a.output,
            seed:            a.seed,
        }
    }
}

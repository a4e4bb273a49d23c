// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data and
// infra layers together for one command. No clap types and no
// printing here.

// Train + validation preparation
pub mod build_use_case;

// Test set preparation
pub mod test_use_case;

// Shuffle index generation
pub mod shuffle_use_case;

// Stepflow Tests
//
// This package holds the end-to-end navigation tests of the workspace.
// It doesn't contain library code; the test targets are listed in Cargo.toml.

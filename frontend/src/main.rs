// The browser entry point is `start` in lib.rs; this binary only exists so
// the crate builds as a normal cargo target on the host.
fn main() {}

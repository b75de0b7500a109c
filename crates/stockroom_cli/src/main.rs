//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `stockroom_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("stockroom_core ping={}", stockroom_core::ping());
    println!("stockroom_core version={}", stockroom_core::core_version());
}

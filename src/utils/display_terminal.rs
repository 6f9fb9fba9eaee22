//! Terminal output for the startup sequence.
//!
//! These go straight to stdout rather than through `log` so the banner
//! shows up regardless of `RUST_LOG`.

/// Prints `title` centered inside a double-line box.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║            🔄 INITIALIZING COMPONENTS            ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(50);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// Prints one indented line under the current step, e.g. `   ├─ faq_repository: ✓ Ready`.
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 COMPONENTS READY");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// Build script for tree_sample
///
/// Shaders are WGSL files loaded at runtime through the shader source factory,
/// so nothing is compiled here. The script only makes cargo aware of them.
fn main() {
    println!("cargo:rerun-if-changed=assets/shaders/tree_vs.wgsl");
    println!("cargo:rerun-if-changed=assets/shaders/tree_ps.wgsl");
}

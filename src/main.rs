// On the native target only the static host runs; the motion core is still
// compiled there so its tests execute under plain `cargo test`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod motion;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
mod backend;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() {
    if let Err(err) = backend::run().await {
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}

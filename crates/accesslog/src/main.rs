use accesslog::runtime::{boot, repl};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let state = boot::boot()?;
    repl::run(state).await
}

#[tokio::main]
async fn main() {
    let code = stockledger::adapter::inbound::cli::run::main().await;
    std::process::exit(code);
}

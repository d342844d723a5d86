use novade_launcher::{app, cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();
    let exit_code = app::run(args).await;
    std::process::exit(exit_code);
}

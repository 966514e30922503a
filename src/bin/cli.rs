use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    trivia::cli::run().await
}

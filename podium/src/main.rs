use podium::Config;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // stdout only carries the podium sentence
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    tracing::debug!("Running with {:?}", config);

    let sentence = podium::run(&config)?;
    println!("{sentence}");

    Ok(())
}

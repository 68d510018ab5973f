use isafe_db::{connect_to_db, logger, Config};


fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let _sentry = logger::init_logger(&config)?;

    connect_to_db(&config)?;
    println!("Connected to DB.");

    Ok(())
}

use eyre::Context;
use simple_weather::{
    options::{self, Options},
    printer, random, reporting, time,
};
use tracing_appender::rolling::Rotation;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    reporting::setup_error_hooks()?;
    let options_init = options::Options::initialize().await;
    let options: Options = options_init.result.map_err(|error| {
        options_init.logs.print();
        error
    })?;

    let reporting_options = reporting::Options {
        data_dir: options.data_dir.clone(),
        log_file: options.log_file,
        log_rotation: Rotation::DAILY,
    };

    let _reporting_guard = reporting::setup_logging(&reporting_options).map_err(|error| {
        options_init.logs.print();
        error
    })?;

    options_init.logs.present();

    let mut random = match options.seed {
        Some(seed) => {
            tracing::info!("Using random seed {}", seed);
            random::Gateway::seeded(seed)
        }
        None => random::Gateway::from_entropy(),
    };

    let mut stdout = std::io::stdout();
    printer::run(&mut stdout, &mut random, &time::Gateway)
        .await
        .wrap_err("Error printing forecast")?;

    Ok(())
}

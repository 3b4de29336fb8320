use dft_image_filter::config::FilterSettings;
use dft_image_filter::filters::filter::{Filter, FilterRegistry};
use dft_image_filter::filters::ideal_dft::IdealDftFilter;
use dft_image_filter::io::{load_image, save_image};
use preferences::{AppInfo, Preferences};
use std::error::Error;
use std::time::Instant;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_INFO: AppInfo = AppInfo {
    name: "DFT Image Filter",
    author: "Linus Leo Stöckli",
};

const PREFS_KEY: &str = "config/filter";

const USAGE: &str = "usage: dft-image-filter <input> <output> [key=value ...]\n\
    keys: filter, wc, direction (both|horizontal|vertical), \
    filter_type (low_pass|high_pass), size";

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        return Err(USAGE.into());
    }
    let (input, output) = (&args[0], &args[1]);

    let mut settings = match FilterSettings::load(&APP_INFO, PREFS_KEY) {
        Ok(settings) => settings,
        Err(err) => {
            log::debug!("no stored settings ({err:?}), using defaults");
            FilterSettings::default()
        }
    };
    for arg in &args[2..] {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{arg}'\n{USAGE}"))?;
        settings.set(key.trim(), value.trim())?;
    }

    let registered = FilterRegistry::lock().get_filter(&settings.filter).cloned();
    let mut filter: Box<dyn Filter> = match registered {
        Some(filter) => filter,
        None => {
            log::warn!(
                "filter '{}' is not registered (available: {:?}), using the ideal DFT filter",
                settings.filter,
                FilterRegistry::lock().names()
            );
            Box::new(IdealDftFilter::new())
        }
    };
    filter.configure(&settings)?;

    let image = load_image(input)?;
    let start = Instant::now();
    let filtered = filter.filter(image.view())?;
    log::info!(
        "{} took {:?} for {}",
        filter.config().name,
        start.elapsed(),
        input
    );
    save_image(&filtered, output)?;

    match settings.save(&APP_INFO, PREFS_KEY) {
        Ok(_) => {}
        Err(err) => {
            log::error!("error in saving filter settings: {err:?}");
        }
    }
    Ok(())
}

fn main() {
    // `log` records from the library are forwarded through the tracing-log bridge
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

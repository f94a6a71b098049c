use anyhow::Context;
use clap::Parser;
use wasm_bindgen::prelude::*;

mod app;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u32>,

    /// Silence tones and noise
    #[arg(short, long)]
    mute: bool,
}

impl Args {
    /// Reads arguments from the page address, e.g. `#-vv&--seed=1234&--mute`.
    fn from_location_hash() -> Result<Self, clap::Error> {
        let location_hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());
        Self::try_parse_from(location_hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let (args, parse_error) = match Args::from_location_hash() {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        if console_log::init_with_level(log_level).is_err() {
            gloo::console::warn!("Logger was already initialized");
        }
    }
    if let Some(err) = parse_error {
        log::warn!("Ignoring location hash arguments: {}", err);
    }
    log::debug!("seed: {:?}, mute: {}", args.seed, args.mute);

    if let Err(err) = mount(&args) {
        log::error!("Could not start: {:#}", err);
    }
}

fn mount(args: &Args) -> anyhow::Result<()> {
    let root = gloo::utils::document()
        .get_element_by_id("game")
        .context("Could not find id=\"game\" element")?;

    let props = app::GameProps {
        seed: args.seed,
        mute: args.mute,
    };
    log::debug!("App started");
    yew::Renderer::<app::GameView>::with_root_and_props(root, props).render();
    Ok(())
}

use std::io::{BufRead, Write};

use mamu_rs_core::installation::{self, mods_dir::{self, ModsDirState}};
use mamu_rs_core::relationship_resolver::ResolverBuilder;

#[tokio::main]
async fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optflag( "v", "verbose",    "Increased verbosity");
		opts.optopt(  "c", "config",     "Config file to read, defaults to config.json", "PATH");
		opts.optflag( "y", "yes",        "Answer yes to every prompt");
		opts.optflag( "",  "keep",       "Never delete existing mods");
		opts.optflag( "",  "dry-run",    "Resolve and print the mods without downloading anything");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: mamu-rs-terminal [options]"));
			return;
		}

		parsed_options
	};

	let level = if parsed_options.opt_present("v") { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

	let options = RunOptions {
		config_path: parsed_options.opt_str("c").unwrap_or_else(|| "config.json".to_string()),
		assume_yes: parsed_options.opt_present("y"),
		keep: parsed_options.opt_present("keep"),
		dry_run: parsed_options.opt_present("dry-run"),
	};

	if let Err(e) = sync_mods(&options).await {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

struct RunOptions {
	config_path: String,
	assume_yes: bool,
	keep: bool,
	dry_run: bool,
}

/// Asks a `[Y/n]` question, see [`read_answer()`].
fn prompt(question: &str, assume_yes: bool) -> bool {
	if assume_yes {
		return true;
	}
	print!("{} [Y/n] ", question);
	let _ = std::io::stdout().flush();
	read_answer(&mut std::io::stdin().lock())
}

/// Any line but `n` is a yes. A closed or unreadable input is a no.
fn read_answer(input: &mut impl BufRead) -> bool {
	let mut line = String::new();
	match input.read_line(&mut line) {
		Ok(0) | Err(_) => {
			log::warn!("No answer given, assuming no.");
			false
		},
		Ok(_) => line.trim().to_lowercase() != "n",
	}
}

async fn sync_mods(options: &RunOptions) -> Result<(), Error> {
	let config = mamu_rs_core::Config::load_from_file(&options.config_path)?;
	let target_dir = config.mods_dir()?;

	if !options.dry_run {
		match mods_dir::inspect(&target_dir, !config.has_explicit_mods_dir()) {
			ModsDirState::Exists => log::info!("Found mods directory: {}", target_dir.display()),
			ModsDirState::GameDirMissing => return Err(Error::MissingGameDirectory(target_dir)),
			ModsDirState::Missing => {
				let question = format!("Could not find mods directory, would you like to create a new folder at {}?", target_dir.display());
				if !prompt(&question, options.assume_yes) {
					return Err(Error::UserCancelled);
				}
				mods_dir::create(&target_dir)?;
			},
		}
	}

	let registry = mamu_rs_core::ModrinthClient::new(&config).map_err(mamu_rs_core::Error::from)?;
	let resolver = ResolverBuilder::from_config(&registry, &config).build();
	let report = resolver.run(config.mods()).await;

	if options.dry_run {
		println!("Versions:");
		for id in report.resolved.sorted_version_ids() {
			println!("\t{}", id);
		}
		println!("Direct downloads:");
		for url in report.resolved.sorted_direct_urls() {
			println!("\t{}", url);
		}
		return Ok(());
	}

	if !options.keep && prompt("Would you like to delete existing mods in the mods directory?", options.assume_yes) {
		mods_dir::clear_existing_mods(&target_dir)?;
	}

	let results = installation::materialize(&registry, &report.resolved, &target_dir, config.verify_checksums()).await;
	let failed = results.iter().filter(|(_, r)| r.is_err()).count();
	let written: usize = results.iter().filter_map(|(_, r)| r.as_ref().ok()).map(Vec::len).sum();
	log::info!("Downloaded {} files", written);

	if failed > 0 {
		return Err(Error::Download(failed));
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("mamu-rs error: {0}")]
	MamuRsError(#[from] mamu_rs_core::Error),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("Minecraft not installed, no game directory for {}", .0.display())]
	MissingGameDirectory(std::path::PathBuf),
	#[error("User cancelled an action")]
	UserCancelled,
	#[error("{0} downloads failed")]
	Download(usize),
}

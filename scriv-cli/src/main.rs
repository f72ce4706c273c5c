// Command-line interface for scriv
//
// This binary generates output documents from scriv markdown files.
//
// The core capabilities live in the scriv-render crate; this program is a thin
// shell over it: it resolves configuration, maps flags onto GenerationOptions,
// picks a backend, and reports the generation result.
//
// Generating:
//
// The backend can be given explicitly with --to, or detected from the output
// file extension.
// Usage:
//  scriv <input.md> --to <backend> [--output <file>]   - Generate a document
//  scriv <input.md> -o report.pdf                      - Backend from extension
//  scriv --list-backends                               - List available backends

use clap::{Arg, ArgAction, Command, ValueHint};
use scriv_config::{Loader, ScrivConfig};
use scriv_render::{generate_from_file, BackendRegistry, GenerationOptions, PageSize};
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("scriv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate documents from scriv markdown files")
        .long_about(
            "scriv turns markdown files written in the scriv dialect into finished\n\
            documents: word-processor packages, slide decks, or typeset PDFs.\n\n\
            The backend is chosen with --to, or detected from the --output file\n\
            extension.\n\n\
            Examples:\n  \
            scriv paper.md --to docx                   # paper.docx next to the input\n  \
            scriv paper.md -o out/paper.pdf            # backend detected from extension\n  \
            scriv paper.md --to slides --theme dark    # themed slide deck\n  \
            scriv paper.md --to pdf --toc --title T    # PDF with TOC and cover title",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-backends")
                .long("list-backends")
                .help("List available backends")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a scriv.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .help("Input markdown file")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .help("Target backend (docx, slides, pdf)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Output file path (defaults to the input name with the backend extension)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("toc")
                .long("toc")
                .help("Include a table of contents")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Cover page title (implies a cover page)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("subtitle")
                .long("subtitle")
                .help("Cover page subtitle")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("author")
                .long("author")
                .help("Cover page author")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("organization")
                .long("organization")
                .help("Cover page organization")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .help("Named theme for the slides backend")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .help("Page size for paged backends")
                .value_parser(clap::builder::PossibleValuesParser::new(["a4", "letter"])),
        )
        .arg(
            Arg::new("margin")
                .long("margin")
                .help("Page margin for the pdf backend (e.g. 1in, 25mm)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("font-size")
                .long("font-size")
                .help("Base font size in points")
                .value_parser(clap::value_parser!(u8).range(6..=72)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the generation result as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();

    if matches.get_flag("list-backends") {
        let registry = BackendRegistry::with_defaults();
        for name in registry.list_backends() {
            let backend = registry.get(&name).expect("listed backend exists");
            println!("{name:<10} {}", backend.description());
        }
        return;
    }

    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: an input file is required (or use --list-backends)");
        std::process::exit(1);
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(String::as_str));
    let mut options: GenerationOptions = (&config).into();
    apply_flag_overrides(&mut options, &matches);

    let registry = BackendRegistry::with_defaults();
    let output_arg = matches.get_one::<String>("output").map(PathBuf::from);

    // --to wins; otherwise detect from the output extension.
    let backend = match matches.get_one::<String>("to") {
        Some(name) => name.clone(),
        None => match output_arg
            .as_ref()
            .and_then(|path| registry.detect_backend_from_filename(&path.to_string_lossy()))
        {
            Some(detected) => detected,
            None => {
                eprintln!("Error: could not determine a backend");
                eprintln!("Pass --to <backend> or an --output path with a known extension");
                std::process::exit(1);
            }
        },
    };

    let backend_impl = match registry.get(&backend) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let output = output_arg.unwrap_or_else(|| {
        Path::new(input).with_extension(backend_impl.file_extension())
    });
    log::debug!("generating '{backend}' output at {}", output.display());

    let result = generate_from_file(Path::new(input), &backend, &output, options);

    if matches.get_flag("json") {
        let rendered = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
            eprintln!("Error serializing result: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
        if !result.success {
            std::process::exit(1);
        }
        return;
    }

    if result.success {
        let path = result
            .output_path
            .as_deref()
            .unwrap_or(output.as_path());
        match result.page_count {
            Some(pages) => println!("Wrote {} ({pages} pages)", path.display()),
            None => println!("Wrote {}", path.display()),
        }
    } else {
        eprintln!(
            "Error: {}",
            result.error.as_deref().unwrap_or("generation failed")
        );
        std::process::exit(1);
    }
}

fn load_cli_config(path: Option<&str>) -> ScrivConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("scriv.toml"),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    })
}

fn apply_flag_overrides(options: &mut GenerationOptions, matches: &clap::ArgMatches) {
    if matches.get_flag("toc") {
        options.include_toc = true;
    }
    if let Some(title) = matches.get_one::<String>("title") {
        options.include_cover_page = true;
        options.cover.title = title.clone();
    }
    if let Some(subtitle) = matches.get_one::<String>("subtitle") {
        options.cover.subtitle = Some(subtitle.clone());
    }
    if let Some(author) = matches.get_one::<String>("author") {
        options.cover.author = Some(author.clone());
    }
    if let Some(organization) = matches.get_one::<String>("organization") {
        options.cover.organization = Some(organization.clone());
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        options.theme = Some(theme.clone());
    }
    if let Some(size) = matches.get_one::<String>("page-size") {
        options.page_size = match size.as_str() {
            "letter" => PageSize::Letter,
            _ => PageSize::A4,
        };
    }
    if let Some(margin) = matches.get_one::<String>("margin") {
        options.margin = margin.clone();
    }
    if let Some(size) = matches.get_one::<u8>("font-size") {
        options.font_size_pt = *size;
    }
}

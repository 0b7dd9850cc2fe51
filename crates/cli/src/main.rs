mod png;
mod render;

use std::fs;
use std::io::{self, Read};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use zpl_label_core::{
    GenerateOptions, LabelFormat, Preview, PrintOrientation, RenderOptions, Symbol, Symbology,
    encode, generate, parse_codes, parse_str, render_forms, render_preview, split_forms,
    symbology::QrPlaceholder, to_pretty_json,
};
use zpl_label_diagnostics::{self as diag, Diagnostic};
use zpl_label_print_client::{PrinterConfig, ReconnectRetryPrinter, TcpPrinter, send_forms};

use crate::render::{Format, print_json, print_summary, render_diagnostics};

// ─── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "zpl-label",
    version,
    about = "Preview, generate and print ZPL labels"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Render a ZPL file to a PNG preview.
    Render {
        /// ZPL file, or `-` for stdin.
        file: String,
        /// Canvas pixels per label dot (0.5 to 5.0).
        #[arg(long, default_value_t = RenderOptions::DEFAULT_SCALE)]
        scale: f64,
        /// PNG to write.
        #[arg(long, default_value = "preview.png")]
        out: PathBuf,
        /// Write one PNG per ^XA...^XZ form (`name-1.png`, `name-2.png`, ...).
        #[arg(long)]
        per_form: bool,
    },

    /// Parse a ZPL file and print its document, commands and diagnostics.
    Parse {
        /// ZPL file, or `-` for stdin.
        file: String,
    },

    /// Generate ZPL labels for a list of codes.
    Generate {
        /// Codes separated by commas or whitespace.
        #[arg(long)]
        codes: String,
        /// Barcode symbology (code128, code39, ean13, qr).
        #[arg(long)]
        barcode: Option<Symbology>,
        /// Print orientation (portrait, landscape).
        #[arg(long)]
        orientation: Option<PrintOrientation>,
        /// Label format (auto, 100x150, 60x40, 58x100, 80x50).
        #[arg(long)]
        format: Option<LabelFormat>,
        /// JSON file with generation options; flags override it.
        #[arg(long)]
        options: Option<PathBuf>,
        /// Timestamp printed on each label. Defaults to the local time.
        #[arg(long)]
        timestamp: Option<String>,
        /// Write the ZPL here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the module pattern of a barcode.
    Encode {
        /// Symbology (code128, code39, ean13, qr).
        symbology: Symbology,
        /// Data to encode.
        data: String,
    },

    /// Send a ZPL file to a network printer.
    Print {
        /// ZPL file, or `-` for stdin.
        file: String,
        /// Printer address: IP, IP:PORT, host or host:PORT (port 9100 by default).
        #[arg(long)]
        printer: String,
        /// Connect timeout in seconds.
        #[arg(long, default_value_t = 5)]
        timeout: u64,
        /// Attempts per form for transient failures.
        #[arg(long, default_value_t = 3)]
        retries: u32,
    },

    /// Explain a diagnostic ID (e.g. LBL1001).
    Explain { id: String },
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Render {
            file,
            scale,
            out,
            per_form,
        } => cmd_render(&file, scale, &out, per_form, format),
        Cmd::Parse { file } => cmd_parse(&file, format),
        Cmd::Generate {
            codes,
            barcode,
            orientation,
            format: label_format,
            options,
            timestamp,
            out,
        } => {
            let mut opts = match options {
                Some(path) => load_options(&path)?,
                None => GenerateOptions::default(),
            };
            opts.barcode = barcode.unwrap_or(opts.barcode);
            opts.orientation = orientation.unwrap_or(opts.orientation);
            opts.format = label_format.unwrap_or(opts.format);
            cmd_generate(&codes, &opts, timestamp, out.as_deref(), format)
        }
        Cmd::Encode { symbology, data } => cmd_encode(symbology, &data, format),
        Cmd::Print {
            file,
            printer,
            timeout,
            retries,
        } => cmd_print(&file, &printer, timeout, retries, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

// ─── Commands ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RenderedForm {
    path: PathBuf,
    width: u32,
    height: u32,
    label_width: u32,
    label_height: u32,
    scale: f64,
    diagnostics: Vec<Diagnostic>,
}

fn cmd_render(file: &str, scale: f64, out: &Path, per_form: bool, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let options = RenderOptions::with_scale(scale);
    let previews: Vec<Preview> = if per_form {
        render_forms(&input, &options)
    } else {
        vec![render_preview(&input, &options)]
    };
    if previews.is_empty() {
        bail!("{file} contains no label forms");
    }

    let count = previews.len();
    let mut rendered = Vec::with_capacity(count);
    for (i, preview) in previews.into_iter().enumerate() {
        let path = png::form_path(out, i, count);
        png::write_png(&preview.canvas, &path)?;

        if format == Format::Pretty {
            let form_input = if per_form {
                split_forms(&input).get(i).copied().unwrap_or(input.as_str())
            } else {
                input.as_str()
            };
            render_diagnostics(form_input, display_name(file), &preview.diagnostics);
            print_summary(&preview.diagnostics);
            println!(
                "label: {}x{} | scale: {}x",
                preview.document.width_dots, preview.document.height_dots, preview.scale
            );
            println!("wrote {}", path.display());
        }

        rendered.push(RenderedForm {
            path,
            width: preview.canvas.width(),
            height: preview.canvas.height(),
            label_width: preview.document.width_dots,
            label_height: preview.document.height_dots,
            scale: preview.scale,
            diagnostics: preview.diagnostics,
        });
    }

    if format == Format::Json {
        print_json(&serde_json::json!({ "forms": rendered }))?;
    }
    Ok(())
}

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let result = parse_str(&input);

    // the parse result is the data either way; pretty mode adds annotated
    // diagnostics on stderr
    println!("{}", to_pretty_json(&result)?);
    if format == Format::Pretty {
        render_diagnostics(&input, display_name(file), &result.diagnostics);
        print_summary(&result.diagnostics);
    }
    Ok(())
}

fn cmd_generate(
    codes: &str,
    options: &GenerateOptions,
    timestamp: Option<String>,
    out: Option<&Path>,
    format: Format,
) -> Result<()> {
    let codes = parse_codes(codes);
    let timestamp =
        timestamp.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d %H:%M").to_string());
    let zpl = generate(&codes, options, &timestamp).context("cannot generate labels")?;

    let Some(path) = out else {
        println!("{zpl}");
        return Ok(());
    };
    fs::write(path, format!("{zpl}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    match format {
        Format::Json => print_json(&serde_json::json!({
            "path": path,
            "labels": codes.len(),
            "format": options.format,
            "barcode": options.barcode,
            "orientation": options.orientation,
        }))?,
        Format::Pretty => eprintln!("wrote {} label(s) to {}", codes.len(), path.display()),
    }
    Ok(())
}

fn cmd_encode(symbology: Symbology, data: &str, format: Format) -> Result<()> {
    let symbol = encode(symbology, data);
    match (format, &symbol) {
        (Format::Json, Symbol::Linear(pattern)) => print_json(&serde_json::json!({
            "symbology": symbology,
            "data": data,
            "pattern": pattern.to_bit_string(),
            "modules": pattern.len(),
        }))?,
        (Format::Json, Symbol::QrPlaceholder(_)) => print_json(&serde_json::json!({
            "symbology": symbology,
            "data": data,
            "placeholder": qr_rows(),
        }))?,
        (Format::Pretty, Symbol::Linear(pattern)) => {
            println!("{pattern}");
            eprintln!("{} modules, {} bars", pattern.len(), pattern.bar_count());
        }
        (Format::Pretty, Symbol::QrPlaceholder(_)) => {
            for row in qr_rows() {
                println!("{row}");
            }
            eprintln!("QR codes are previewed as a placeholder pattern");
        }
    }
    Ok(())
}

/// The QR placeholder grid, one string of `1`/`0` per row.
fn qr_rows() -> Vec<String> {
    (0..QrPlaceholder::GRID)
        .map(|row| {
            (0..QrPlaceholder::GRID)
                .map(|col| if QrPlaceholder::is_filled(col, row) { '1' } else { '0' })
                .collect()
        })
        .collect()
}

fn cmd_print(file: &str, printer: &str, timeout: u64, retries: u32, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let forms = split_forms(&input);
    if forms.is_empty() {
        bail!("{file} contains no label forms");
    }

    let mut config = PrinterConfig::default();
    config.timeouts.connect = Duration::from_secs(timeout);
    config.retry.max_attempts = retries.max(1);

    let tcp = TcpPrinter::connect(printer, config)
        .with_context(|| format!("cannot connect to printer {printer}"))?;
    let remote = tcp.remote_addr();
    let retry = tcp.config().retry.clone();
    let mut printer = ReconnectRetryPrinter::new(tcp, retry);

    let summary = send_forms(&mut printer, &forms, |progress| {
        if format == Format::Pretty {
            eprintln!("sent {}/{}", progress.sent, progress.total);
        }
        ControlFlow::Continue(())
    })
    .with_context(|| format!("printing to {remote} failed"))?;

    match format {
        Format::Json => print_json(&serde_json::json!({
            "printer": remote.to_string(),
            "sent": summary.sent,
            "total": summary.total,
        }))?,
        Format::Pretty => println!("sent {} form(s) to {remote}", summary.sent),
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    let text = diag::explain(id);
    match format {
        Format::Json => print_json(&serde_json::json!({
            "id": id,
            "explanation": text,
        }))?,
        Format::Pretty => {
            use ariadne::Fmt;
            match text {
                Some(text) => println!("{}: {}", id.fg(ariadne::Color::Cyan), text),
                None => println!("{id}: (no explanation available)"),
            }
        }
    }
    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Read `file`, or stdin for `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read {file}"))
}

fn display_name(file: &str) -> &str {
    if file == "-" { "<stdin>" } else { file }
}

fn load_options(path: &Path) -> Result<GenerateOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid options in {}", path.display()))
}

//! Generate command - turn an invoice or UPO XML into a printout.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};

use ksef_pdf_core::models::document::DocumentKind;
use ksef_pdf_core::{
    AdditionalData, DocumentRenderer, GeneratedDocument, KsefConfig, PdfRenderer,
    generate_invoice, generate_upo, parse, process_qr_template,
};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Document type
    #[arg(short = 't', long = "type", value_enum)]
    doc_type: DocType,

    /// Input XML file (required unless --stream)
    #[arg(short, long, required_unless_present = "stream")]
    input: Option<PathBuf>,

    /// Output file (default: input path with the format's extension)
    #[arg(short, long, conflicts_with = "stream")]
    output: Option<PathBuf>,

    /// Read XML from stdin and write the result to stdout
    #[arg(long)]
    stream: bool,

    /// KSeF number of the invoice
    #[arg(long)]
    nr_ksef: Option<String>,

    /// Verification URL template with {nip}, {p1} and {hash} placeholders
    #[arg(long)]
    qr_code: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pdf")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DocType {
    /// Structured invoice (FA(1), FA(2) or FA(3))
    Invoice,
    /// Official acknowledgement of receipt
    Upo,
}

impl From<DocType> for DocumentKind {
    fn from(value: DocType) -> Self {
        match value {
            DocType::Invoice => DocumentKind::Invoice,
            DocType::Upo => DocumentKind::Upo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// PDF document
    Pdf,
    /// Content tree as JSON
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
        }
    }
}

pub async fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        KsefConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path))?
    } else {
        KsefConfig::default()
    };

    let kind = DocumentKind::from(args.doc_type);
    let additional = additional_data(&args, kind)?;

    let raw = read_input(&args).await?;
    let document = parse(&raw)?;

    let generated = match kind {
        DocumentKind::Invoice => {
            let additional = finalize(additional, &raw, &document)?;
            generate_invoice(&document, &additional, &config.generation)?
        }
        DocumentKind::Upo => generate_upo(&document)?,
    };

    let bytes = encode(&generated, args.format, &config)?;
    debug!("Generated {} bytes in {:?}", bytes.len(), start.elapsed());

    if args.stream {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let output_path = output_path(&args)?;
    tokio::fs::write(&output_path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Wrote {}", output_path.display());
    println!(
        "{} {} generated: {}",
        style("✓").green(),
        args.format.extension().to_uppercase(),
        output_path.display()
    );

    Ok(())
}

/// Invoices need both the KSeF number and the verification URL template.
fn additional_data(args: &GenerateArgs, kind: DocumentKind) -> anyhow::Result<AdditionalData> {
    if kind == DocumentKind::Upo {
        return Ok(AdditionalData::default());
    }

    let Some(nr_ksef) = args.nr_ksef.clone() else {
        anyhow::bail!("--nr-ksef is required for invoices");
    };
    let Some(qr_code) = args.qr_code.clone() else {
        anyhow::bail!("--qr-code is required for invoices");
    };

    Ok(AdditionalData {
        nr_ksef: Some(nr_ksef),
        qr_code: Some(qr_code),
    })
}

/// Replace the URL template with the finalized link.
fn finalize(
    additional: AdditionalData,
    raw: &str,
    document: &ksef_pdf_core::XmlElement,
) -> anyhow::Result<AdditionalData> {
    let qr_code = match additional.qr_code.as_deref() {
        Some(template) => Some(process_qr_template(template, raw, document)?),
        None => None,
    };
    Ok(AdditionalData {
        qr_code,
        ..additional
    })
}

async fn read_input(args: &GenerateArgs) -> anyhow::Result<String> {
    if args.stream {
        let mut buffer = Vec::new();
        tokio::io::stdin().read_to_end(&mut buffer).await?;
        if buffer.is_empty() {
            anyhow::bail!("No input received on stdin");
        }
        debug!("Read {} bytes from stdin", buffer.len());
        return String::from_utf8(buffer).context("Input is not valid UTF-8");
    }

    let Some(input) = &args.input else {
        anyhow::bail!("--input is required unless --stream is set");
    };
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());
    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))
}

fn encode(
    generated: &GeneratedDocument,
    format: OutputFormat,
    config: &KsefConfig,
) -> anyhow::Result<Vec<u8>> {
    match format {
        OutputFormat::Pdf => {
            let renderer = PdfRenderer::new(config.render.clone());
            Ok(renderer.render(&generated.content)?)
        }
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(generated)?),
    }
}

fn output_path(args: &GenerateArgs) -> anyhow::Result<PathBuf> {
    if let Some(output) = &args.output {
        return Ok(output.clone());
    }
    match &args.input {
        Some(input) => Ok(input.with_extension(args.format.extension())),
        None => anyhow::bail!("Cannot derive an output path without --input"),
    }
}

//! Exam Print - Lay out an exam as a paginated printable document
//!
//! Reads an exam as JSON, builds its draw instructions and writes them out
//! through one of the render_model renderers.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use exam_model::Exam;
use layout_engine::{AssembledDocument, DocumentAssembler, DocumentTemplate, LayoutConfig};
use render_model::{DocumentRenderer, JsonRenderer, PlainTextRenderer};
use std::path::PathBuf;
use text_engine::{
    CharWidthMeasurer, FontStyle, FontWeight, ShapingMeasurer, TextMeasurer, MM_PER_INCH,
    POINTS_PER_INCH,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TemplateKind {
    /// Full exam with topic distribution and answer breakdown
    Exam,
    /// Generated question set
    Generated,
    /// Classifier-labelled question set
    Ml,
}

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out an exam as a paginated printable document")]
struct Args {
    /// Exam JSON file
    exam: PathBuf,

    /// Layout configuration JSON (defaults to A4 with built-in spacing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output filename (defaults to sinav_{date}.{ext})
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document variant
    #[arg(short, long, value_enum, default_value = "exam")]
    template: TemplateKind,

    /// Topic printed in the header of a generated set
    #[arg(long)]
    topic: Option<String>,

    /// Model name printed in the header of a classifier-labelled set
    #[arg(long, default_value = "unknown")]
    model_type: String,

    /// Model accuracy in percent
    #[arg(long, default_value = "0")]
    accuracy: f64,

    /// Regular TrueType/OpenType font used to measure text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold font used to measure bold text
    #[arg(long, requires = "font")]
    font_bold: Option<PathBuf>,

    /// Italic font used to measure italic text
    #[arg(long, requires = "font")]
    font_italic: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("failed to load layout config {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let json = std::fs::read_to_string(&args.exam)
        .with_context(|| format!("failed to read {}", args.exam.display()))?;
    let exam = Exam::from_json_str(&json)
        .with_context(|| format!("invalid exam in {}", args.exam.display()))?;
    tracing::info!(questions = exam.len(), "loaded exam");

    let template = match args.template {
        TemplateKind::Exam => DocumentTemplate::exam(),
        TemplateKind::Generated => DocumentTemplate::generated_set(args.topic.as_deref()),
        TemplateKind::Ml => DocumentTemplate::ml_set(args.model_type.clone(), args.accuracy),
    };

    let doc = match &args.font {
        Some(regular) => {
            let regular = read_font(regular)?;
            let bold = args.font_bold.as_ref().map(read_font).transpose()?;
            let italic = args.font_italic.as_ref().map(read_font).transpose()?;

            let mut measurer = ShapingMeasurer::new(MM_PER_INCH / POINTS_PER_INCH);
            measurer.load_font(FontWeight::Normal, FontStyle::Normal, &regular)?;
            if let Some(bold) = &bold {
                measurer.load_font(FontWeight::Bold, FontStyle::Normal, bold)?;
            }
            if let Some(italic) = &italic {
                measurer.load_font(FontWeight::Normal, FontStyle::Italic, italic)?;
            }
            assemble(config.clone(), measurer, &exam, &template)?
        }
        None => assemble(config.clone(), CharWidthMeasurer::millimetres(), &exam, &template)?,
    };

    if !doc.clipped_answers.is_empty() {
        tracing::warn!(
            "{} answer key entries did not fit on the answer page",
            doc.clipped_answers.len()
        );
    }

    let renderer: Box<dyn DocumentRenderer> = match args.format {
        OutputFormat::Text => Box::new(PlainTextRenderer::default()),
        OutputFormat::Json => Box::new(JsonRenderer::pretty()),
    };
    let output = args.output.clone().unwrap_or_else(|| {
        let date = Local::now().format("%Y-%m-%d");
        PathBuf::from(format!("sinav_{date}.{}", renderer.extension()))
    });

    renderer
        .render_to_file(&doc, &config.geometry, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!(pages = doc.page_count, output = %output.display(), "document written");

    Ok(())
}

fn assemble<M: TextMeasurer>(
    config: LayoutConfig,
    measurer: M,
    exam: &Exam,
    template: &DocumentTemplate,
) -> Result<AssembledDocument> {
    let assembler = DocumentAssembler::new(config, measurer)?;
    Ok(assembler.build(exam, template)?)
}

fn read_font(path: &PathBuf) -> Result<Vec<u8>> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
    if data.is_empty() {
        bail!("font file {} is empty", path.display());
    }
    Ok(data)
}

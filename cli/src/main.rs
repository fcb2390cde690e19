//! undocx CLI - Word document segmentation and conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use undocx::{ConverterConfig, CoverMeta, HtmlVariant, SlideOptions, Undocx, UndocxResult};

#[derive(Parser)]
#[command(name = "undocx")]
#[command(version)]
#[command(about = "Segment Word documents into HTML, slides, and workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a docx to an HTML fragment
    Html {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit bare tags without classes or inline styles
        #[arg(long)]
        bare: bool,
    },

    /// Convert a docx to a paginated PPTX slide deck
    Slides {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output pptx file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Rewrite each block through the configured LLM (falls back to a
        /// local summary when unavailable)
        #[arg(long)]
        rewrite: bool,

        /// Title of the leading deck slide
        #[arg(long)]
        title: Option<String>,

        /// Line budget per slide
        #[arg(long)]
        max_lines: Option<usize>,
    },

    /// Convert a docx to a workbook document
    Workbook {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output docx file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Subject shown large on the cover
        #[arg(long, default_value = "BWI")]
        subject: String,

        /// Profile/elective part
        #[arg(long, default_value = "")]
        profile: String,

        /// Assignment number
        #[arg(long, default_value = "1")]
        assignment: String,

        /// Assignment title
        #[arg(long, default_value = "Opdracht")]
        title: String,

        /// Duration of the assignment
        #[arg(long, default_value = "")]
        duration: String,

        /// Teacher name on the cover
        #[arg(long, default_value = "")]
        teacher: String,

        /// Class name prefilled in the name/class table
        #[arg(long, default_value = "")]
        class: String,

        /// Logo image placed top-right on the cover
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,
    },

    /// Rewrite a docx into a lesson-style document
    Lesson {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output docx file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the segmented block structure as JSON
    Json {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = ConverterConfig::from_env();

    let result = match cli.command {
        Commands::Html {
            input,
            output,
            bare,
        } => cmd_html(&config, &input, output.as_deref(), bare),
        Commands::Slides {
            input,
            output,
            rewrite,
            title,
            max_lines,
        } => cmd_slides(&config, &input, output.as_deref(), rewrite, title, max_lines),
        Commands::Workbook {
            input,
            output,
            subject,
            profile,
            assignment,
            title,
            duration,
            teacher,
            class,
            logo,
        } => cmd_workbook(
            &config,
            &input,
            output.as_deref(),
            CoverArgs {
                subject,
                profile,
                assignment,
                title,
                duration,
                teacher,
                class,
                logo,
            },
        ),
        Commands::Lesson { input, output } => cmd_lesson(&config, &input, output.as_deref()),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Info { input } => cmd_info(&input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct CoverArgs {
    subject: String,
    profile: String,
    assignment: String,
    title: String,
    duration: String,
    teacher: String,
    class: String,
    logo: Option<PathBuf>,
}

fn open(config: &ConverterConfig, input: &Path) -> undocx::Result<UndocxResult> {
    Undocx::from_config(config).open(input)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} {}", "Written:".green().bold(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn output_path(input: &Path, output: Option<&Path>, extension: &str) -> PathBuf {
    output.map(Path::to_path_buf).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}.{}", stem, extension))
    })
}

fn cmd_html(
    config: &ConverterConfig,
    input: &Path,
    output: Option<&Path>,
    bare: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let variant = if bare {
        HtmlVariant::Bare
    } else {
        HtmlVariant::Styled
    };
    let html = Undocx::from_config(config)
        .with_html_variant(variant)
        .open(input)?
        .to_html()?;
    write_or_print(output, &html)
}

fn cmd_slides(
    config: &ConverterConfig,
    input: &Path,
    output: Option<&Path>,
    rewrite: bool,
    title: Option<String>,
    max_lines: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = SlideOptions::default();
    if let Some(title) = title {
        options = options.with_deck_title(title);
    }
    if let Some(lines) = max_lines {
        options = options.with_max_lines(lines);
    }

    let result = Undocx::from_config(config)
        .with_slide_options(options)
        .open(input)?;
    let bytes = if rewrite {
        result.to_slides_rewritten()?
    } else {
        result.to_slides()?
    };

    let path = output_path(input, output, "pptx");
    fs::write(&path, bytes)?;
    println!("{} {}", "Written:".green().bold(), path.display());
    Ok(())
}

fn cmd_workbook(
    config: &ConverterConfig,
    input: &Path,
    output: Option<&Path>,
    args: CoverArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let logo = match args.logo {
        Some(ref path) => Some(fs::read(path)?),
        None => None,
    };
    let meta = CoverMeta {
        subject: args.subject,
        profile: args.profile,
        assignment_no: args.assignment,
        assignment_title: args.title,
        duration: args.duration,
        teacher: args.teacher,
        class_name: args.class,
        logo,
        ..CoverMeta::default()
    };

    let bytes = open(config, input)?.to_workbook(&meta, None)?;
    let path = output_path(input, output, "werkboek.docx");
    fs::write(&path, bytes)?;
    println!("{} {}", "Written:".green().bold(), path.display());
    Ok(())
}

fn cmd_lesson(
    config: &ConverterConfig,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = open(config, input)?.to_lesson()?;
    let path = output_path(input, output, "les.docx");
    fs::write(&path, bytes)?;
    println!("{} {}", "Written:".green().bold(), path.display());
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = Undocx::new().open(input)?.to_json(!compact)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = undocx::parse_file(input)?;
    let blocks = undocx::segment_document(&doc, None);

    println!("{}", "Document".green().bold());
    println!("  {} {}", "paragraphs:".dimmed(), doc.paragraphs.len());
    println!("  {} {}", "images:".dimmed(), doc.images.len());
    println!("  {} {}", "blocks:".dimmed(), blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        let title = block.title.as_deref().unwrap_or("(zonder titel)");
        println!("  {} {}: {} items", format!("block {}", i + 1).dimmed(), title, block.body.len());
    }
    Ok(())
}

//! vademecum - Compile annotated legal text into a two-column PDF

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vademecum")]
#[command(version, about = "Compile annotated legal text into a two-column PDF", long_about = None)]
#[command(after_help = "EXAMPLES:
    vademecum --example > cdc.json      Write an example compilation
    vademecum cdc.json -o out/          Render it into out/<title>.pdf
    cat cdc.json | vademecum --toc      Render from stdin and list the contents")]
struct Cli {
    /// Compilation JSON ({ \"laws\": [...], \"config\": {...} }). Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Directory the PDF is written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Print an example compilation and exit
    #[arg(long)]
    example: bool,

    /// Print the table of contents after rendering
    #[arg(long)]
    toc: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.example {
        print!("{}", EXAMPLE_COMPILATION);
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> vademecum::Result<()> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let document = vademecum::render_json(&input)?;
    fs::create_dir_all(&cli.output)?;
    let path = document.save_to(&cli.output)?;

    if !cli.quiet {
        eprintln!(
            "Written {} pages ({} bytes) to {}",
            document.page_count,
            document.bytes.len(),
            path.display()
        );
    }

    if cli.toc {
        for entry in &document.toc {
            println!("{:>5}  {}  ({})", entry.page, entry.name, entry.counts_line());
        }
    }

    Ok(())
}

const EXAMPLE_COMPILATION: &str = r##"{
  "laws": [
    {
      "id": 1,
      "name": "Código de Defesa do Consumidor",
      "category": "Consumidor",
      "clauses": [
        {
          "order": 1,
          "label": "Art. 1º",
          "text": "Art. 1º O presente código estabelece normas de proteção e defesa do consumidor, de ordem pública e interesse social.",
          "highlighted": true,
          "color": "verde",
          "tags": ["principios"],
          "importance": 4
        },
        {
          "order": 2,
          "label": "Art. 2º",
          "text": "Consumidor é toda pessoa física ou jurídica que adquire ou utiliza produto ou serviço como destinatário final.",
          "highlighted": true,
          "color": "azul",
          "annotation": "Teoria finalista mitigada no STJ."
        },
        {
          "order": 3,
          "label": "Art. 3º",
          "text": "Fornecedor é toda pessoa física ou jurídica, pública ou privada, nacional ou estrangeira, que desenvolvem atividade de produção, montagem, criação, construção, transformação, importação, exportação, distribuição ou comercialização de produtos ou prestação de serviços."
        }
      ]
    }
  ],
  "config": {
    "title": "Vademecum do Consumidor",
    "contest": "OAB - Exame de Ordem",
    "author": "Equipe Vademecum",
    "edition": "1ª edição",
    "year": "2026",
    "notices": "Texto legal atualizado até a data de geração.",
    "colorLegend": {
      "verde": "Artigos mais cobrados",
      "azul": "Jurisprudência relevante"
    },
    "options": {
      "exportAnnotations": true
    }
  }
}
"##;

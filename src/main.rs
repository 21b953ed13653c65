use std::path::PathBuf;
use clap::Parser;
use log::{debug, warn};
use crate::chart::{ChartLabels, ChartStyle, Figure};

mod chart;
mod csv_handler;
mod error;
mod frequency;

const PREVIEW_ROWS: usize = 5;

/// Renders descriptive charts for a cleaned banking transactions dataset
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The transactions CSV file
    #[arg(default_value = "transacciones_bancarias_limpio.csv")]
    input: PathBuf,

    /// Directory the SVG charts are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of clients in the client ranking chart
    #[arg(long, default_value_t = frequency::TOP_CLIENTS)]
    top: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let style = ChartStyle::default();
    println!("✅ Chart styles configured");

    let table = csv_handler::load_csv_file(&args.input)?;
    println!("Dataset cargado: {} registros", table.len());
    println!("Columnas: {:?}", table.columns());
    for record in table.head(PREVIEW_ROWS) {
        println!("{}, {}, {}", record.fecha, record.tipo_transaccion, record.cliente_id);
    }

    if table.is_empty() {
        warn!("{} has no rows, charts will be empty", args.input.display());
    }

    let by_type = frequency::count_by_type(&table);
    debug!("{} transaction types over {} rows", by_type.len(), by_type.total());
    let figure = Figure::new(args.output_dir.join("transacciones_por_tipo.svg"), &style);
    let labels = ChartLabels::new(
        "Transacciones por Tipo",
        "Tipo de Transacción",
        "Cantidad de Transacciones",
    );
    let figure = chart::draw_vertical_bars(figure, &by_type, &labels, &style)?;
    debug!("Type chart size: {}x{} px", figure.size().0, figure.size().1);
    println!("Gráfico guardado: {} ({} barras)", figure.path().display(), figure.bars());

    let top_clients = frequency::top_clients(&table, args.top);
    if top_clients.is_empty() {
        warn!("No client identifiers found, the client chart has no bars");
    }
    let figure = Figure::new(args.output_dir.join("top_clientes.svg"), &style);
    let labels = ChartLabels::new(
        format!("Top {} Clientes con Más Transacciones", args.top),
        "Cantidad de Transacciones",
        "Cliente ID",
    );
    let figure = chart::draw_horizontal_bars(figure, &top_clients, &labels, &style)?;
    println!("Gráfico guardado: {} ({} barras)", figure.path().display(), figure.bars());

    Ok(())
}

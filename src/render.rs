use analytics::{SectorStats, Summary};
use analyzer::ResultBundle;
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::DerivedRecord;
use rust_decimal::Decimal;

/// Record-valued views show this many rows unless `--limit` says otherwise.
pub const DEFAULT_LIMIT: usize = 20;
/// The volatility overview is wider; it defaults to more rows.
pub const DEFAULT_VOLATILITY_LIMIT: usize = 50;

/// Which part of the result bundle to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Summary followed by every non-empty result set.
    Overview,
    Breakout,
    RangeBound,
    NearLows,
    Sectors,
    Summary,
    /// Annual range of every stock, ordered by symbol.
    Volatility,
    /// Every row with its derived metrics.
    All,
}

/// Renders the requested view as text ready for the terminal.
pub fn render_view(bundle: &ResultBundle, view: View, limit: Option<usize>) -> String {
    let rows = limit.unwrap_or(DEFAULT_LIMIT);
    match view {
        View::Overview => {
            let mut views = vec![View::Summary];
            views.extend(
                [
                    (View::Breakout, bundle.breakout().is_empty()),
                    (View::RangeBound, bundle.range_bound().is_empty()),
                    (View::NearLows, bundle.near_lows().is_empty()),
                    (View::Sectors, bundle.sector_stats().is_empty()),
                ]
                .into_iter()
                .filter(|(_, empty)| !empty)
                .map(|(view, _)| view),
            );
            views
                .into_iter()
                .map(|view| render_view(bundle, view, limit))
                .collect::<Vec<_>>()
                .join("\n")
        }
        View::Breakout => section(
            "Stocks Near 52-Week High (Breakout Potential)",
            bundle.breakout(),
            rows,
            "No breakout candidates found. Try adjusting thresholds.",
        ),
        View::RangeBound => section(
            "Low-Volatility (Range-Bound) Stocks",
            bundle.range_bound(),
            rows,
            "No range-bound stocks detected.",
        ),
        View::NearLows => section(
            "Stocks Near 52-Week Low",
            bundle.near_lows(),
            rows,
            "No stocks near their 52-week low (this view needs a current price column).",
        ),
        View::Sectors => {
            if bundle.sector_stats().is_empty() {
                "== Sector Volatility ==\nNo sector data available.\n".to_string()
            } else {
                format!(
                    "== Sector Volatility ==\n{}\n",
                    sector_table(bundle.sector_stats())
                )
            }
        }
        View::Summary => format!("== Summary ==\n{}\n", summary_table(bundle.summary())),
        View::Volatility => format!(
            "== Volatility by Symbol ==\n{}\n",
            volatility_table(bundle.all_data(), limit.unwrap_or(DEFAULT_VOLATILITY_LIMIT))
        ),
        View::All => section("All Rows", bundle.all_data(), rows, "The input has no rows."),
    }
}

fn section(title: &str, records: &[DerivedRecord], limit: usize, empty_notice: &str) -> String {
    if records.is_empty() {
        return format!("== {title} ==\n{empty_notice}\n");
    }
    let mut text = format!("== {title} ==\n{}\n", records_table(records, limit));
    if records.len() > limit {
        text.push_str(&format!("... {} more row(s)\n", records.len() - limit));
    }
    text
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h)));
    table
}

fn number_cell(value: Option<Decimal>) -> Cell {
    Cell::new(fmt_decimal(value)).set_alignment(CellAlignment::Right)
}

fn fmt_decimal(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.round_dp(2).normalize().to_string())
}

fn records_table(records: &[DerivedRecord], limit: usize) -> Table {
    let with_price = records.iter().any(|r| r.current_price.is_some());
    let mut header = vec!["Symbol", "Sector", "52W High", "52W Low"];
    if with_price {
        header.push("Price");
    }
    header.extend(["Range %", "Low-to-High Gap %"]);
    if with_price {
        header.extend(["vs Low %", "vs High %"]);
    }

    let mut table = new_table(&header);
    for r in records.iter().take(limit) {
        let mut row = vec![
            Cell::new(r.symbol.as_deref().unwrap_or("-")),
            Cell::new(r.sector.as_deref().unwrap_or("-")),
            number_cell(r.high),
            number_cell(r.low),
        ];
        if with_price {
            row.push(number_cell(r.current_price));
        }
        row.extend([number_cell(r.price_range_pct), number_cell(r.distance_to_high_pct)]);
        if with_price {
            row.extend([
                number_cell(r.current_vs_low_pct),
                number_cell(r.current_vs_high_pct),
            ]);
        }
        table.add_row(row);
    }
    table
}

fn sector_table(stats: &[SectorStats]) -> Table {
    let mut table = new_table(&["Sector", "Stocks", "Avg High", "Avg Volatility %"]);
    for s in stats {
        table.add_row(vec![
            Cell::new(&s.sector),
            Cell::new(s.stock_count).set_alignment(CellAlignment::Right),
            number_cell(s.avg_high),
            number_cell(s.avg_volatility),
        ]);
    }
    table
}

fn summary_table(summary: &Summary) -> Table {
    let mut table = new_table(&["Metric", "Value"]);
    let count = |n: usize| Cell::new(n).set_alignment(CellAlignment::Right);
    table.add_row(vec![Cell::new("Total rows"), count(summary.total_rows)]);
    table.add_row(vec![Cell::new("Rows with a valid range"), count(summary.valid_rows)]);
    table.add_row(vec![Cell::new("Near 52-week low"), count(summary.near_low_count)]);
    table.add_row(vec![
        Cell::new("Mean range %"),
        number_cell(summary.mean_price_range_pct),
    ]);
    table.add_row(vec![
        Cell::new("Median % above low"),
        number_cell(summary.median_current_vs_low_pct),
    ]);
    table.add_row(vec![
        Cell::new("Far below 52-week high"),
        count(summary.far_below_high_count),
    ]);
    table
}

fn volatility_table(records: &[DerivedRecord], limit: usize) -> Table {
    let mut by_symbol: Vec<&DerivedRecord> = records.iter().collect();
    // Rows without a symbol sort last.
    by_symbol.sort_by(|a, b| match (&a.symbol, &b.symbol) {
        (Some(a), Some(b)) => a.cmp(b),
        (a, b) => b.is_some().cmp(&a.is_some()),
    });

    let mut table = new_table(&["Symbol", "Range %"]);
    for r in by_symbol.into_iter().take(limit) {
        table.add_row(vec![
            Cell::new(r.symbol.as_deref().unwrap_or("-")),
            number_cell(r.price_range_pct),
        ]);
    }
    table
}

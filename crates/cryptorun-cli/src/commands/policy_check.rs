use anyhow::Result;
use clap::Args;

use cryptorun_policy::{validate_all, PolicySnapshot, ValidateAllInput};
use cryptorun_schemas::{DataSource, DataType, Venue};

/// One-shot `ValidateAll` run (C1, spec.md §4.1) against an empty policy
/// snapshot (no pause/blacklist/emergency state, since this command never
/// starts a long-lived `PolicyManager`). Useful to check how a symbol/venue/
/// price combination would be treated before wiring it into a full scan.
#[derive(Args, Debug)]
pub struct PolicyCheckArgs {
    /// Raw symbol, e.g. BTCUSD or btcusd.
    #[arg(long)]
    symbol: String,

    /// Venue tag: kraken, binance, okx, coinbase. Omit to check the
    /// "no venue available" path.
    #[arg(long)]
    venue: Option<String>,

    /// Allow a non-primary venue to pass `ValidateVenuePreference`.
    #[arg(long, default_value_t = false)]
    allow_fallback: bool,

    /// Data source tag, e.g. kraken, coingecko, dexscreener.
    #[arg(long, default_value = "kraken")]
    data_source: String,

    /// Data type this source is supplying: depth, spread, orderbook, l1,
    /// l2, trades, ticker, or other (anything else).
    #[arg(long, default_value = "depth")]
    data_type: String,

    /// Last traded price, for the stablecoin-depeg check.
    #[arg(long)]
    price: f64,
}

fn parse_data_type(raw: &str) -> DataType {
    match raw.to_ascii_lowercase().as_str() {
        "depth" => DataType::Depth,
        "spread" => DataType::Spread,
        "orderbook" => DataType::OrderBook,
        "l1" => DataType::L1,
        "l2" => DataType::L2,
        "trades" => DataType::Trades,
        "ticker" => DataType::Ticker,
        _ => DataType::Other,
    }
}

pub fn run(args: PolicyCheckArgs) -> Result<()> {
    let venue = args.venue.as_deref().and_then(Venue::parse);
    let data_source = DataSource::new(&args.data_source);
    let data_type = parse_data_type(&args.data_type);

    let input = ValidateAllInput {
        symbol_raw: &args.symbol,
        venue,
        allow_fallback: args.allow_fallback,
        data_source: &data_source,
        data_type,
        price: args.price,
    };

    match validate_all(&PolicySnapshot::default(), &input) {
        Ok(()) => {
            println!("PASS");
            Ok(())
        }
        Err(e) => {
            println!("REJECT {} {}", e.code.as_code(), e.evidence);
            Ok(())
        }
    }
}

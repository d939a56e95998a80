use cryptorun_schemas::Venue;
use cryptorun_testkit::{l1_snapshot, l2_ladder, ticker, FixtureVenueClient};
use cryptorun_venue::VenueClient;

#[tokio::test]
async fn fixture_venue_client_serves_a_full_symbol_snapshot() {
    let symbol = cryptorun_schemas::Symbol::try_new("ETHUSD").unwrap();
    let l1 = l1_snapshot("ETHUSD", Venue::Kraken, 3_000.0, 3_002.0, 1_700_000_000);
    let l2 = l2_ladder("ETHUSD", Venue::Kraken, 1_700_000_000, 12, 3_000.0, 3_002.0, 3.0);
    let tick = ticker("ETHUSD", 3_001.0, 10_000.0, 3_100.0, 2_900.0);

    let client = FixtureVenueClient::new("kraken")
        .with_book("ETHUSD", l1.clone(), l2.clone())
        .with_ticker("ETHUSD", tick.clone());

    let (got_l1, got_l2) = client.fetch_order_book(&symbol, 20).await.unwrap();
    assert_eq!(got_l1, l1);
    assert_eq!(got_l2, l2);

    let got_ticker = client.fetch_ticker(&symbol).await.unwrap();
    assert_eq!(got_ticker, tick);
}

use std::path::PathBuf;

use docweave_lib::{
    Docweave,
    catalog::FragmentCatalog,
    context::{Brokerage, Features, PageContext},
    docweave_error::DocweaveErrorKind,
    renderer::FragmentRenderer,
    site::{Location, Page, PageAssembler},
};

fn content(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../content")
        .join(dir)
}

fn fixture(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/broken")
        .join(dir)
}

fn assemble(page_path: &str) -> String {
    let catalog = FragmentCatalog::load(&content("resources")).unwrap();
    let pages = content("pages");
    let page = Page::load(&pages, &pages.join(page_path)).unwrap();
    PageAssembler::new(&catalog).assemble(&page).unwrap()
}

#[test]
fn test_check_demo_site() {
    let docweave = Docweave::new(
        content("pages"),
        content("resources"),
        PathBuf::from("build"),
    );
    let report = docweave.check().unwrap();
    assert!(!report.has_failures(), "{report}");
    assert_eq!(report.rendered().len(), 6);
}

#[test]
fn test_alpaca_deploy_page() {
    let html =
        assemble("cloud-platform/live-trading/brokerages/alpaca/deploy-live-algorithms.html");
    // brokerage name comes from the page front matter
    assert!(
        html.contains("click <span class=\"readable-name\">Alpaca</span> from the drop-down menu")
    );
    // authentication steps come from the live-deploy parameter object
    assert!(html.contains("<span class='field-name'>Environment</span>"));
    assert!(html.contains("Trade with paper money"));
    assert!(html.contains("precedence in Lean"));
    // cloud deployments pick a node, the CLI step stays out
    assert!(html.contains("<span class=\"field-name\">Node</span>"));
    assert!(!html.contains("lean live deploy"));
    // Alpaca passes neither cash state nor holdings state
    assert!(!html.contains("Algorithm Cash State"));
    assert!(!html.contains("Algorithm Holdings State"));
}

#[test]
fn test_wolverine_orders_page() {
    let html = assemble("cloud-platform/live-trading/brokerages/wolverine/orders.html");
    assert!(html.contains("Our Wolverine Execution Services integration"));
    assert!(html.contains(
        "We model the Wolverine Execution Services API by not supporting order updates"
    ));
    assert!(html.contains("We model custom order properties from the Wolverine API."));
    // the code sample only appears for algorithm writers
    assert!(!html.contains("section-example-container"));
}

#[test]
fn test_wolverine_fragment_wording_follows_audience() {
    let catalog = FragmentCatalog::load(&content("resources")).unwrap();
    let renderer = FragmentRenderer::new(&catalog);
    let writer_context = PageContext::resolve(
        &Location::parse("writing-algorithms/trading-and-orders/order-types").unwrap(),
        None,
        Features::default(),
    )
    .unwrap();
    let reference_context = PageContext::resolve(
        &Location::parse("cloud-platform/live-trading/brokerages/wolverine/orders").unwrap(),
        Some(Brokerage {
            name: "Wolverine Execution Services".to_string(),
        }),
        Features::default(),
    )
    .unwrap();

    let writer = renderer
        .render("brokerages/wolverine/orders", &writer_context, None)
        .unwrap();
    let reference = renderer
        .render("brokerages/wolverine/orders", &reference_context, None)
        .unwrap();

    assert!(writer.html.contains(
        "The <code>WolverineBrokerageModel</code> doesn't support order updates."
    ));
    assert!(reference.html.contains(
        "We model the Wolverine Execution Services API by not supporting order updates."
    ));
    assert!(writer.html.contains("section-example-container"));
    assert!(!reference.html.contains("section-example-container"));
    assert_eq!(writer.languages.len(), 2);
    assert!(reference.languages.is_empty());

    // content outside the audience conditionals is identical
    let table = |html: &str| {
        let start = html.find("<table").unwrap();
        let end = html.find("</table>").unwrap();
        html[start..end].to_string()
    };
    assert_eq!(table(&writer.html), table(&reference.html));
}

#[test]
fn test_consolidator_page_derives_period_forms() {
    let html = assemble(
        "writing-algorithms/consolidating-data/consolidator-types/mixed-mode-consolidators/consolidate-quote-bars.html",
    );
    assert!(html.contains("QuoteBar</code> objects represent the bid and ask prices"));
    assert!(html.contains("new QuoteBarConsolidator(10, TimeSpan.FromDays(1));"));
    assert!(html.contains("QuoteBarConsolidator(10, timedelta(days=1))"));
    assert!(html.contains("receives its first bar at 9:31"));
    assert!(html.contains(
        "Consolidate&lt;QuoteBar&gt;(symbol, 10, TimeSpan.FromDays(1), ConsolidationHandler);"
    ));
}

#[test]
fn test_delistings_page_single_language_sample() {
    let html = assemble("writing-algorithms/historical-data/us-equities/delistings.html");
    assert!(html.contains(
        "src='https://cdn.quantconnect.com/i/tu/history-deslisting-dataframe-us-equities.png'"
    ));
    assert!(html.contains("var history = History&lt;Delisting&gt;(symbol, TimeSpan.FromDays(10*365);"));
    assert!(html.contains("<div class=\"section-example-container\">\n    <pre class=\"csharp\">"));
    assert!(html.contains(concat!(
        "<div class=\"python section-example-container\">\n",
        "    <pre class=\"python\"># Get the deslistings of an asset over the last 10 years in Delisting format.\n",
        "history = self.history[Delisting](symbol, timedelta(10*365))</pre>\n",
        "</div>"
    )));
}

#[test]
fn test_renders_are_deterministic() {
    let first =
        assemble("cloud-platform/live-trading/brokerages/alpaca/deploy-live-algorithms.html");
    let second =
        assemble("cloud-platform/live-trading/brokerages/alpaca/deploy-live-algorithms.html");
    assert_eq!(first, second);
}

#[test]
fn test_broken_pages_do_not_stop_the_build() {
    let docweave = Docweave::new(
        fixture("pages"),
        fixture("resources"),
        PathBuf::from("build"),
    );
    let report = docweave.check().unwrap();
    assert_eq!(report.rendered().len(), 1);
    assert_eq!(report.rendered()[0], "writing-algorithms/intro");

    let failures: Vec<(&str, DocweaveErrorKind)> = report
        .failures()
        .iter()
        .map(|f| (f.location.as_str(), f.error.kind()))
        .collect();
    assert_eq!(
        failures,
        vec![
            (
                "cloud-platform/bad-front-matter",
                DocweaveErrorKind::InvalidField
            ),
            (
                "writing-algorithms/bad-placeholder",
                DocweaveErrorKind::PlaceholderMismatch
            ),
        ]
    );
    assert!(report.to_string().contains("1 pages rendered, 2 failed"));
}

#[test]
fn test_single_page_render() {
    let docweave = Docweave::new(
        content("pages"),
        content("resources"),
        PathBuf::from("build"),
    );
    let html = docweave
        .render_page("local-platform/datasets/alpha-vantage/introduction")
        .unwrap();
    assert!(html.contains("Lean.DataSource.AlphaVantage repository"));

    let err = docweave.render_page("../escape").unwrap_err();
    assert_eq!(err.kind(), DocweaveErrorKind::InvalidLocation);
}

use crate::criteria::CriteriaUpdate;
use crate::logging::LogLevel;
use crate::pipeline::{DashboardSession, SessionConfig};
use crate::producer::{ProducerDriver, SyntheticProducer, SyntheticProducerConfig};
use crate::store::EventStore;
use anyhow::Result;
use std::thread;
use std::time::Duration;

/// Demo entrypoint: seeds the reference dataset, runs the synthetic producer
/// briefly, walks through criteria updates and pagination, and prints the
/// chart payload, CSV export, telemetry, and log lines.
pub fn run() -> Result<()> {
    let store = EventStore::seeded();
    let mut session = DashboardSession::new(store.clone(), SessionConfig::default());
    session.set_log_level(LogLevel::Debug);

    let producer = SyntheticProducer::new(SyntheticProducerConfig::default());
    let driver = ProducerDriver::spawn(producer, store.clone(), Duration::from_millis(150));
    thread::sleep(Duration::from_millis(500));
    driver.stop();
    println!(
        "producer delivered {} records ({} rejected)",
        driver.delivered_total(),
        driver.rejected_total()
    );

    let view = session.refresh();
    println!(
        "full view: {} of {} events on page {}, {} series",
        view.page_len,
        view.filtered_total,
        view.window.page_number(),
        view.chart.len()
    );
    println!("{}", serde_json::to_string_pretty(&view.chart)?);

    session.update_criteria(CriteriaUpdate::Endpoints(vec!["/home".to_string()]))?;
    let view = session.refresh();
    println!(
        "/home only: {} events across {} pages",
        view.filtered_total, view.page_count
    );

    session.update_criteria(CriteriaUpdate::Endpoints(Vec::new()))?;
    session.update_criteria(CriteriaUpdate::MinCount("3000".to_string()))?;
    let view = session.refresh();
    println!("spikes at 3000+: {} events", view.filtered_total);

    if let Err(err) = session.update_criteria(CriteriaUpdate::MinCount("many".to_string())) {
        println!("rejected update kept previous criteria: {err}");
    }

    session.next_page();
    let view = session.refresh();
    println!(
        "page {} holds {} events",
        view.window.page_number(),
        view.page_len
    );
    session.prev_page();

    session.update_criteria(CriteriaUpdate::MinCount(String::new()))?;
    let document = session.export_csv();
    println!("{} ({} lines)", document.file_name, document.line_count());
    println!("{}", document.body);

    print!("{}", session.render_telemetry());
    for line in session.log_lines() {
        println!("{line}");
    }
    Ok(())
}

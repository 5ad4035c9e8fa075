use std::error::Error;
use std::time::{Duration, SystemTime};

use airgradient_metrics::logging;
use airgradient_metrics::prelude::*;
use airgradient_metrics::source::constants::KNOWN_DEVICES;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    logging::init();

    let building = std::env::args().nth(1).unwrap_or_else(|| "High Holborn HH_308".to_string());

    println!("Known devices:");
    for (name, topic) in KNOWN_DEVICES {
        println!("  {:<24} {}", name, topic);
    }

    let window = ReadingWindow::shared(WindowConfig::realtime())?;
    window.lock().only_source(building.as_str());
    window.lock().on_alert(|alert| println!("  !! {}", alert));

    let (source, handle) = SubscriptionSource::for_building(&building, 64)?;
    println!("\nSubscribed to {}", handle.topic().unwrap_or("<untracked>"));

    // Stands in for the broker glue delivering telemetry messages
    let publisher = tokio::spawn(async move {
        for i in 0..20u32 {
            let co2 = 700 + i * 40;
            let payload = format!(
                r#"{{"rco2": {}, "atmp": 22.5, "rhum": 51, "tvoc_index": 1, "pm01": 3, "pm02": 5, "pm10": 8}}"#,
                co2
            );
            if handle.publish_json(&payload).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    });

    let mut stream = ReadingStream::new(window.clone(), source);
    stream.play();
    publisher.await?;
    stream.pause().await;

    let snapshot = stream.snapshot();
    println!("\n{} readings retained", snapshot.len());
    if let Some(stats) = snapshot.stats(MetricKind::Co2) {
        println!("CO2 min {:.0} / mean {:.0} / max {:.0} ppm", stats.min, stats.mean, stats.max);
    }
    if let Some(latest) = snapshot.latest() {
        let age = SystemTime::now().duration_since(latest.timestamp()).unwrap_or_default();
        println!("Latest reading is {:.1}s old", age.as_secs_f64());
    }

    Ok(())
}

use std::error::Error;
use std::time::Duration;

use airgradient_metrics::logging;
use airgradient_metrics::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "demos/data/readings_sample.json".to_string());
    let config = match std::env::args().nth(2) {
        Some(config_path) => MonitorConfig::from_path(config_path)?,
        None => MonitorConfig { replay_interval_ms: 100, ..MonitorConfig::default() },
    };

    println!("AirGradient Replay Monitor");
    println!("==========================");

    let window = ReadingWindow::shared(config.window_config()?)?;
    {
        let window = window.lock();
        window.on_alert(|alert| println!("  !! {}", alert.message()));
        window.on_update(|snapshot| {
            if let Some(latest) = snapshot.latest() {
                println!(
                    "{:>3} readings | CO2 {:>6.0} ppm | PM2.5 {:>5.1} µg/m³ | {}",
                    snapshot.len(),
                    latest.value(MetricKind::Co2),
                    latest.value(MetricKind::Pm25),
                    AirQualityCategory::for_reading(latest)
                );
            }
        });
    }

    let source = ReplaySource::from_path(&path)?.with_interval(config.replay_interval()).tagged("Greencoat GB_G03");
    println!("Replaying {} readings from {}", source.len(), path);

    let mut stream = ReadingStream::new(window.clone(), source);
    stream.play();

    tokio::time::sleep(Duration::from_secs(2)).await;
    stream.pause().await;
    println!("\nPaused with {} readings in the window", window.lock().len());
    tokio::time::sleep(Duration::from_millis(500)).await;

    stream.play();
    while stream.state() == StreamState::Playing {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    stream.pause().await;

    let snapshot = stream.snapshot();
    println!("\nWindow averages:");
    println!("----------------");
    if let Some(averages) = snapshot.averages() {
        for (metric, mean) in averages.iter() {
            println!("{:<12} {:>8.1} {}", metric.name(), mean, metric.unit());
        }
    }

    if let (Some(first), Some(last)) = (snapshot.iter().next(), snapshot.latest()) {
        let json = snapshot.export_json(first.timestamp(), last.timestamp())?;
        println!("\nExport is {} bytes of JSON", json.len());
    }

    Ok(())
}

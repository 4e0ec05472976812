//! Three-thread simulation of the tilt pipeline.
//!
//! Each thread stands in for one core: the sensor thread samples a
//! synthetic accelerometer, the broker thread forwards between the two
//! hops, and the console thread polls the final mailbox and writes text
//! frames to stdout.
//!
//! Run with: `RUST_LOG=debug cargo run --example tilt_pipeline`

use level::config::PipelineConfig;
use level::tilt::TiltReading;
use level_ipc::{Pipeline, TiltSensor, transport};
use std::thread;
use std::time::{Duration, Instant};

/// Synthetic accelerometer tracing a slow circular wobble.
struct WobbleSensor {
    started: Instant,
}

impl TiltSensor for WobbleSensor {
    fn sample(&mut self) -> TiltReading {
        let t = self.started.elapsed().as_secs_f32();
        TiltReading::new(0.3 * (t * 2.0).sin(), 0.3 * (t * 2.0).cos())
    }
}

fn main() {
    level_ipc::init_tracing();

    let config = PipelineConfig::default();
    let pipeline = Pipeline::bring_up(&config);
    let Pipeline {
        mut sensor,
        mut broker,
        mut console,
    } = pipeline;

    let run_for = Duration::from_secs(2);

    let sensor_core = {
        let period = config.sample_period();
        thread::spawn(move || {
            let mut driver = WobbleSensor {
                started: Instant::now(),
            };
            let deadline = Instant::now() + run_for;
            while Instant::now() < deadline {
                if let Err(e) = sensor.publish(driver.sample()) {
                    tracing::warn!(error = %e, "publish failed");
                }
                thread::sleep(period);
            }
            sensor.stats()
        })
    };

    let broker_core = {
        let period = config.broker_period();
        thread::spawn(move || {
            let deadline = Instant::now() + run_for;
            while Instant::now() < deadline {
                if let Err(e) = broker.cycle() {
                    tracing::warn!(error = %e, "broker cycle failed");
                }
                thread::sleep(period);
            }
            broker.inbound_stats()
        })
    };

    let console_core = {
        let period = config.consumer_period();
        thread::spawn(move || {
            let mut stdout = std::io::stdout();
            let deadline = Instant::now() + run_for;
            while Instant::now() < deadline {
                match console.poll() {
                    Ok(Some((reading, version))) => {
                        tracing::debug!(version, "console received");
                        if let Err(e) = transport::send_reading(&mut stdout, &reading) {
                            tracing::warn!(error = %e, "transmit failed");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "poll failed"),
                }
                thread::sleep(period);
            }
            console.stats()
        })
    };

    let produced = sensor_core.join().expect("sensor thread");
    let forwarded = broker_core.join().expect("broker thread");
    let consumed = console_core.join().expect("console thread");

    tracing::info!(
        published = produced.attempts,
        broker_fresh = forwarded.fresh,
        console_fresh = consumed.fresh,
        console_stale = consumed.stale,
        "pipeline shut down"
    );
}

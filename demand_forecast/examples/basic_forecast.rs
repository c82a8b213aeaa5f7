use demand_forecast::models::exponential_smoothing::ExponentialSmoothing;
use demand_forecast::models::moving_average::SimpleMovingAverage;
use demand_forecast::models::weighted_moving_average::WeightedMovingAverage;
use demand_forecast::report::format_forecast;
use demand_forecast::{DemandTable, ForecastModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Example");
    println!("==============================\n");

    // Sample table: Month 1-5, Demand 120, 130, 110, 140, 160
    let table = DemandTable::template()?;
    let series = table.demand_series()?;
    println!("Demand: {:?}\n", series.as_slice());

    let models: Vec<Box<dyn ForecastModel>> = vec![
        Box::new(SimpleMovingAverage::new(3)?),
        Box::new(WeightedMovingAverage::new([3.0, 2.0, 1.0])?),
        Box::new(ExponentialSmoothing::new(0.1, series.first().unwrap_or_default())?),
    ];

    for model in &models {
        let outcome = model.forecast(&series)?;

        println!("{} [{}]", model.name(), model.column_name());
        for (period, value) in outcome.annotated.values().iter().enumerate() {
            match value {
                Some(v) => println!("  Period {}: {}", period + 1, format_forecast(*v)),
                None => println!("  Period {}: -", period + 1),
            }
        }
        println!(
            "  Forecast for period {}: {}\n",
            series.len() + 1,
            format_forecast(outcome.next_period)
        );
    }

    Ok(())
}

//! See [`run()`].

use std::io::Write;

use eyre::Context;

use crate::{
    forecast::{
        Condition, Reading, CITIES, HEADER, MAX_TEMPERATURE, MIN_TEMPERATURE, READING_DELAY,
    },
    random, time,
};

/// Generate the [`Reading`] for `city`. The condition is drawn first, then the temperature.
fn next_reading(city: &'static str, random: &mut dyn random::Port) -> eyre::Result<Reading> {
    let conditions = Condition::enumerate();
    let index = random.choose_index(conditions.len());
    let condition = *conditions.get(index).ok_or_else(|| {
        eyre::eyre!(
            "Random condition index {} is out of bounds for {} conditions",
            index,
            conditions.len()
        )
    })?;
    let temperature = random.int_in_range(MIN_TEMPERATURE, MAX_TEMPERATURE);

    Ok(Reading {
        city,
        condition,
        temperature,
    })
}

/// Print the header, then one randomly generated [`Reading`] per city in [`CITIES`] order,
/// pausing for [`READING_DELAY`] after each line. Output is flushed after every line so that
/// the pause is visible.
///
/// Returns the readings in the order they were printed. Failing to write to `out` is not
/// recovered from.
#[tracing::instrument(skip_all)]
pub async fn run<W: Write>(
    out: &mut W,
    random: &mut dyn random::Port,
    time: &dyn time::Port,
) -> eyre::Result<Vec<Reading>> {
    writeln!(out, "{}\n", HEADER).wrap_err("Error writing header")?;
    out.flush().wrap_err("Error flushing header")?;

    let mut readings = Vec::with_capacity(CITIES.len());
    for city in CITIES {
        let reading = next_reading(city, random)?;
        tracing::debug!(
            city = reading.city,
            condition = %reading.condition,
            temperature = reading.temperature,
            "Generated reading"
        );

        writeln!(out, "{}", reading)
            .and_then(|_| out.flush())
            .wrap_err_with(|| format!("Error writing reading for {}", city))?;
        readings.push(reading);

        tracing::trace!("Pausing for {}", humantime::format_duration(READING_DELAY));
        time.async_sleep(READING_DELAY).await;
    }

    tracing::debug!("Printed {} readings", readings.len());
    Ok(readings)
}

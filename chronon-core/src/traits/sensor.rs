//! External temperature sensor abstraction

/// Temperature sensor on the far side of the one-wire bridge
///
/// Conversions are started and collected in separate calls because
/// the sensor needs most of a second to convert; the scheduler places
/// the two calls at opposite ends of its cycle.
pub trait ExternalSensor {
    /// Trigger a temperature conversion.
    fn start_conversion(&mut self) -> bool;

    /// Collect the result of a previously started conversion.
    ///
    /// Returns `None` on transfer failure or checksum mismatch; the
    /// previously displayed value stays in effect.
    fn read_temperature(&mut self) -> Option<i8>;
}

use crate::Point2;
use crate::common::polar_to_cartesian;
use crate::errors::SliceError;
use serde::Serialize;

/// Samples of a polar diagram at (nominally) one true wind speed: equally long sequences of wind
/// speed, wind angle in degrees and boat speed, optionally with one opaque info value per sample
/// (such as the sail plan which produced it).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice<I = String> {
    ws: Vec<f64>,
    wa: Vec<f64>,
    bsp: Vec<f64>,
    info: Option<Vec<I>>,
}

impl<I> Slice<I> {
    /// Create a slice from its three component sequences, which must have the same length.
    ///
    /// # Arguments
    ///
    /// * `ws`: true wind speed of each sample
    /// * `wa`: true wind angle of each sample, in degrees
    /// * `bsp`: boat speed of each sample
    ///
    /// returns: Result<Slice<I>, SliceError>
    ///
    /// # Examples
    ///
    /// ```
    /// use sailpolar::Slice;
    /// let slice = Slice::<String>::new(vec![6.0, 6.0], vec![45.0, 90.0], vec![4.1, 5.3]).unwrap();
    /// assert_eq!(slice.len(), 2);
    /// ```
    pub fn new(ws: Vec<f64>, wa: Vec<f64>, bsp: Vec<f64>) -> Result<Self, SliceError> {
        if ws.len() != wa.len() || wa.len() != bsp.len() {
            return Err(SliceError::LengthMismatch {
                ws: ws.len(),
                wa: wa.len(),
                bsp: bsp.len(),
            });
        }
        Ok(Self {
            ws,
            wa,
            bsp,
            info: None,
        })
    }

    /// Create a slice whose samples all share the same wind speed.
    pub fn at_wind_speed(ws: f64, wa: Vec<f64>, bsp: Vec<f64>) -> Result<Self, SliceError> {
        Self::new(vec![ws; wa.len()], wa, bsp)
    }

    /// Attach one info value per sample.
    pub fn with_info(mut self, info: Vec<I>) -> Result<Self, SliceError> {
        if info.len() != self.len() {
            return Err(SliceError::InfoLengthMismatch {
                info: info.len(),
                points: self.len(),
            });
        }
        self.info = Some(info);
        Ok(self)
    }

    pub fn ws(&self) -> &[f64] {
        &self.ws
    }

    pub fn wa(&self) -> &[f64] {
        &self.wa
    }

    pub fn bsp(&self) -> &[f64] {
        &self.bsp
    }

    pub fn info(&self) -> Option<&[I]> {
        self.info.as_deref()
    }

    pub fn len(&self) -> usize {
        self.wa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wa.is_empty()
    }

    /// The samples projected onto the plane, with the boat speed as radius and the wind angle
    /// measured counter-clockwise from the positive x axis.
    pub fn cartesian(&self) -> Vec<Point2> {
        self.wa
            .iter()
            .zip(self.bsp.iter())
            .map(|(&wa, &bsp)| polar_to_cartesian(wa, bsp))
            .collect()
    }
}

use crate::{Error, Result};

/// Constituent particles of a rigid body, relative to its center in the
/// body frame
#[derive(Clone, Debug, PartialEq)]
pub struct BodyTemplate {
    pub positions: Vec<[f64; 3]>,
    pub types: Vec<String>,
}
impl BodyTemplate {
    pub fn new(positions: Vec<[f64; 3]>, types: Vec<String>) -> Result<Self> {
        if positions.len() != types.len() {
            return Err(Error::InvalidParam(format!(
                "rigid template has {} positions but {} types",
                positions.len(),
                types.len()
            )));
        }
        if positions.iter().flatten().any(|x| !x.is_finite()) {
            return Err(Error::InvalidParam(
                "rigid template positions should be finite".to_string(),
            ));
        }
        Ok(Self { positions, types })
    }

    /// Two satellites of `satellite_type` at `distance` from the center,
    /// rotated by `±angle` (radians) from the y axis in the xy plane
    pub fn trimer(satellite_type: &str, distance: f64, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            positions: vec![
                [distance * s, distance * c, 0.0],
                [-distance * s, distance * c, 0.0],
            ],
            types: vec![satellite_type.to_string(), satellite_type.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn trimer_satellites_sit_at_sixty_degrees() {
        let template = BodyTemplate::trimer("B", 1.0, PI / 3.0);
        assert_eq!(template.len(), 2);
        assert_eq!(template.types, vec!["B", "B"]);
        let [p, q] = [template.positions[0], template.positions[1]];
        assert_relative_eq!(p[0], 3f64.sqrt() / 2.0);
        assert_relative_eq!(p[1], 0.5);
        assert_relative_eq!(q[0], -3f64.sqrt() / 2.0);
        assert_relative_eq!(q[1], 0.5);
        assert_eq!(p[2], 0.0);
    }

    #[test]
    fn mismatched_lengths_fail() {
        assert!(BodyTemplate::new(vec![[0.0; 3]], vec![]).is_err());
    }
}

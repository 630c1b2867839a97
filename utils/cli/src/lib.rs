//! Helpers for the `lumicast` binary: sequence image loading and run
//! configuration validation.

use std::{net::IpAddr, path::Path, time::Duration};

use lumicast_animator::{
    core::{
        sequence::{PixelGrid, Sequence},
        time::FrameRate,
    },
    RepeatPolicy,
};

/// Highest supported playback frame rate. The devices visibly fall behind
/// beyond this, so faster configurations are rejected up front.
pub const MAX_FRAME_RATE: u32 = 20;

/// A validated player configuration.
#[derive(Debug)]
pub struct RunConfig {
    /// Device addresses, in sequence-row order.
    pub lights: Vec<IpAddr>,
    pub frame_rate: FrameRate,
    pub repeat: RepeatPolicy,
}

/// Decodes an image file into an owned RGB8 pixel grid.
pub fn load_sequence(path: impl AsRef<Path>) -> anyhow::Result<PixelGrid> {
    let image = image::io::Reader::open(path)?.decode()?.to_rgb8();
    let (width, height) = image.dimensions();
    Ok(PixelGrid::from_raw(
        width as usize,
        height as usize,
        image.as_raw(),
    ))
}

/// Checks every option before the scheduler starts.
///
/// Problems are collected into one list so the user can fix them all at
/// once; any problem rejects the whole run, no light is dropped
/// individually.
pub fn validate_run(
    sequence: &PixelGrid,
    lights: &[String],
    fps: u32,
    repeat_count: Option<u32>,
    repeat_duration: Option<u64>,
) -> Result<RunConfig, Vec<String>> {
    let mut errors = Vec::new();

    if fps == 0 || fps > MAX_FRAME_RATE {
        errors.push(format!(
            "frame rate must be between 1 and {MAX_FRAME_RATE}, got {fps}"
        ));
    }
    if sequence.light_count() < lights.len() {
        errors.push(format!(
            "the sequence image has {} row(s), not enough for {} light(s)",
            sequence.light_count(),
            lights.len()
        ));
    }
    if repeat_count.is_some() && repeat_duration.is_some() {
        errors.push("--repeat-count and --repeat-duration are mutually exclusive".to_string());
    }

    let mut addresses = Vec::with_capacity(lights.len());
    for light in lights {
        match light.parse::<IpAddr>() {
            Ok(address) => addresses.push(address),
            Err(_) => errors.push(format!("{light} is not a valid IP address")),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let repeat = match (repeat_count, repeat_duration) {
        (Some(count), None) => RepeatPolicy::Count(count),
        (None, Some(secs)) => RepeatPolicy::For(Duration::from_secs(secs)),
        _ => RepeatPolicy::UntilCancelled,
    };
    Ok(RunConfig {
        lights: addresses,
        frame_rate: FrameRate(fps),
        repeat,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lumicast_animator::{core::sequence::PixelGrid, RepeatPolicy};

    use super::validate_run;

    fn two_row_grid() -> PixelGrid {
        PixelGrid::from_raw(1, 2, &[1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn valid_configuration_passes() {
        let config = validate_run(
            &two_row_grid(),
            &["192.168.1.10".to_string(), "192.168.1.11".to_string()],
            10,
            None,
            Some(30),
        )
        .unwrap();

        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.frame_rate.0, 10);
        assert_eq!(config.repeat, RepeatPolicy::For(Duration::from_secs(30)));
    }

    #[test]
    fn repeat_policy_defaults_to_until_cancelled() {
        let config =
            validate_run(&two_row_grid(), &["10.0.0.1".to_string()], 10, None, None).unwrap();
        assert_eq!(config.repeat, RepeatPolicy::UntilCancelled);

        let config =
            validate_run(&two_row_grid(), &["10.0.0.1".to_string()], 10, Some(4), None).unwrap();
        assert_eq!(config.repeat, RepeatPolicy::Count(4));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let errors = validate_run(
            &two_row_grid(),
            &[
                "10.0.0.1".to_string(),
                "not-an-address".to_string(),
                "10.0.0.3".to_string(),
            ],
            0,
            Some(1),
            Some(10),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("frame rate"));
        assert!(errors[1].contains("2 row(s)"));
        assert!(errors[2].contains("mutually exclusive"));
        assert!(errors[3].contains("not-an-address"));
    }

    #[test]
    fn frame_rate_bounds() {
        let lights = vec!["10.0.0.1".to_string()];
        assert!(validate_run(&two_row_grid(), &lights, 21, None, None).is_err());
        assert!(validate_run(&two_row_grid(), &lights, 20, None, None).is_ok());
        assert!(validate_run(&two_row_grid(), &lights, 1, None, None).is_ok());
    }
}

use crate::foundation::core::{AgentId, Rgb};

/// Strategy for assigning a display color to a newly recorded agent.
///
/// The assigner is consulted exactly once per agent, at the moment the log
/// parser records its first `Agent` line; the returned color is stable for
/// the agent's lifetime. No strategy guarantees distinct colors across
/// agents.
pub trait ColorAssigner {
    /// Choose the display color for `id`.
    fn assign(&mut self, id: AgentId) -> Rgb;
}

/// Fixed 12-entry palette, cycled in assignment order.
///
/// This is the default strategy: fully deterministic, so replays (and their
/// tests) are reproducible run to run.
#[derive(Debug, Default)]
pub struct PaletteCycle {
    next: usize,
}

const PALETTE: [Rgb; 12] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
    Rgb::new(0x39, 0x2b, 0x58),
    Rgb::new(0xff, 0xbb, 0x78),
];

impl PaletteCycle {
    /// Create a cycler starting at the first palette entry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColorAssigner for PaletteCycle {
    fn assign(&mut self, _id: AgentId) -> Rgb {
        let c = PALETTE[self.next % PALETTE.len()];
        self.next += 1;
        c
    }
}

/// Hue spread derived from the agent id.
///
/// Stands in for per-agent random draws: colors look scattered across the
/// hue wheel but are a pure function of the id, so the same log always
/// replays with the same colors. Like a random draw, nearby ids may land on
/// similar hues; there is no collision avoidance.
#[derive(Debug, Default)]
pub struct HashedHue;

impl ColorAssigner for HashedHue {
    fn assign(&mut self, id: AgentId) -> Rgb {
        // Golden-angle stepping spreads consecutive ids across the wheel.
        let hue = (f64::from(id.0) * 137.508) % 360.0;
        hsl_to_rgb(hue, 0.65, 0.5)
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    // Standard HSL -> RGB conversion (sRGB space, normalized 0..1 inputs).
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        let v = to_u8(l);
        return Rgb::new(v, v, v);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_in_assignment_order() {
        let mut c = PaletteCycle::new();
        let first = c.assign(AgentId(42));
        let second = c.assign(AgentId(7));
        assert_eq!(first, PALETTE[0]);
        assert_eq!(second, PALETTE[1]);

        for _ in 0..PALETTE.len() - 2 {
            c.assign(AgentId(0));
        }
        // Wraps back to the start after one full cycle.
        assert_eq!(c.assign(AgentId(0)), PALETTE[0]);
    }

    #[test]
    fn hashed_hue_is_a_pure_function_of_id() {
        let mut a = HashedHue;
        let mut b = HashedHue;
        assert_eq!(a.assign(AgentId(3)), b.assign(AgentId(3)));
        assert_ne!(a.assign(AgentId(0)), a.assign(AgentId(1)));
    }

    #[test]
    fn hsl_grey_axis() {
        assert_eq!(hsl_to_rgb(123.0, 0.0, 0.5), Rgb::new(128, 128, 128));
    }
}

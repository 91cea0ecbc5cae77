use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const SIMULATION_INTERVAL: Duration = Duration::from_millis(120);

/// Synthetic device traffic for trying rules without hardware.
///
/// Models a small oven controller: the heater toggles every 13 lines and
/// temperatures drift with it.
#[derive(Debug)]
pub struct Simulator {
    rng: StdRng,
    seq: u64,
    ntc: f64,
    core: f64,
    target: f64,
    heater: bool,
    mask: u16,
}

impl Simulator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            seq: 0,
            ntc: 22.0,
            core: 23.0,
            target: 40.0,
            heater: false,
            mask: 0x0000,
        }
    }

    pub fn next_line(&mut self) -> String {
        self.seq += 1;
        if self.seq % 13 == 0 {
            self.heater = !self.heater;
        }

        let (ntc_step, core_step) = if self.heater {
            (
                0.15 + self.rng.random::<f64>() * 0.05,
                0.05 + self.rng.random::<f64>() * 0.03,
            )
        } else {
            (
                -(0.03 + self.rng.random::<f64>() * 0.02),
                -(0.01 + self.rng.random::<f64>() * 0.01),
            )
        };
        self.ntc = (self.ntc + ntc_step).clamp(18.0, 80.0);
        self.core = (self.core + core_step).clamp(18.0, 70.0);

        if self.seq % 40 == 0 {
            self.mask ^= 0x0010;
        }
        if self.seq % 97 == 0 {
            self.mask ^= 0x0040;
        }

        let r: f64 = self.rng.random();
        if r < 0.45 {
            let adc0 = (self.ntc * 10.0) as i64;
            return format!(
                "[HOST/INFO] STATUS received, mask=0x{m:04x} (    0x{m:04x}), adc=[{adc0},0,0,0] tempRaw={adc0}",
                m = self.mask
            );
        }
        if r < 0.70 {
            let intent = u8::from(self.heater && self.core < self.target - 0.3);
            let (heat_rem, rest_rem) = if self.heater { (800, 0) } else { (0, 1200) };
            return format!(
                "[OVEN/INFO] [T11] mode=0 door=0 lock=0 ntc={ntc:.2} core={core:.2} ui={core:.2} ctrl={core:.2} \
                 tgt={tgt:.2} lo={lo:.2} hi={hi:.2} heaterIntent={intent} heatRemMs={heat_rem} restRemMs={rest_rem}",
                ntc = self.ntc,
                core = self.core,
                tgt = self.target,
                lo = self.target - 3.0,
                hi = self.target + 3.0,
            );
        }
        if r < 0.80 {
            let state = if self.heater { "ON" } else { "OFF" };
            return format!("[HEATER/INFO] {state} pwm=4000Hz duty=50%");
        }
        if r < 0.90 {
            return "[UI/DEBUG] screen_main tick".to_string();
        }
        if r < 0.97 {
            return "[HOST/DEBUG] RX burst: 128 bytes".to_string();
        }
        "[HOST/ERROR] UART timeout while polling STATUS".to_string()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

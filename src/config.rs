/// Per-device behaviour switches, fixed at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Answer every query on a pointer device as a 3 byte boot mouse with a single
    /// unnumbered report, whatever the descriptor says.
    pub pointer_boot_compat: bool,
    /// Idle rate passed to the device, in 4 ms units; zero reports only on change.
    pub idle_duration: u8,
    /// Clear the keyboard LEDs (NUM LOCK) when attaching a boot keyboard.
    pub clear_num_lock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pointer_boot_compat: true,
            idle_duration: 0,
            clear_num_lock: true,
        }
    }
}

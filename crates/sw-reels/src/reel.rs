//! Reel runtime state

use sw_core::Symbol;
use sw_tween::{TweenTarget, Value};

/// One slot of a reel's symbol strip
#[derive(Debug, Clone)]
pub struct ReelSlot {
    /// Symbol currently shown in this slot
    pub symbol: Symbol,
    /// Vertical offset of the slot in layout units; negative while the slot
    /// is above the visible window
    pub y: f64,
}

/// Runtime state of one reel column
///
/// `position` is the continuous scroll counter: its integer crossings drive
/// symbol swaps, its fractional part drives sub-slot placement. The strip
/// carries one slot more than the visible row count so a symbol can scroll
/// in while another scrolls out.
#[derive(Debug, Clone, Default)]
pub struct Reel {
    pub slots: Vec<ReelSlot>,
    pub position: f64,
    pub blur: f64,
}

impl TweenTarget for Reel {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "position" => Some(Value::Number(self.position)),
            "blur" => Some(Value::Number(self.blur)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        let Some(number) = value.as_number() else {
            log::warn!("reel field '{name}' ignored non-numeric value");
            return;
        };
        match name {
            "position" => self.position = number,
            "blur" => self.blur = number,
            _ => {}
        }
    }
}

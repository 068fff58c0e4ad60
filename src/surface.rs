//! Where the controls sit on the front panel, for drawing an on-screen mock-up of the device.
//! Units are millimeters from the top-left corner.

use crate::oxi_one::{Cell, GRID_HEIGHT, GRID_WIDTH, KNOB_COUNT};

const ELEMENT_SIZE: f32 = 10.0;
const GRID_LEFT: f32 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    fn square(x: f32, y: f32) -> Self {
        Self { x, y, width: ELEMENT_SIZE, height: ELEMENT_SIZE }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub bounds: Bounds,
}

/// Total panel size as `(width, height)`
pub fn physical_size() -> (f32, f32) {
    (GRID_WIDTH as f32 * ELEMENT_SIZE + GRID_LEFT, 80.0)
}

/// Every element of the mock-up: transport row, encoders, then the grid row by row
pub fn layout() -> Vec<Element> {
    let element = |id: String, x: f32, y: f32| Element { id, bounds: Bounds::square(x, y) };

    let mut elements = vec![
        element("SHIFT_BUTTON".to_string(), 5.0, 70.0),
        element("STOP_BUTTON".to_string(), 15.0, 70.0),
        element("RECORD_BUTTON".to_string(), 25.0, 70.0),
        element("PLAY_BUTTON".to_string(), 35.0, 70.0),
    ];
    elements.extend((0..KNOB_COUNT).map(|i| element(format!("ENC_{}", i), 5.0 + 15.0 * i as f32, 0.5)));
    elements.extend(Cell::all().map(|cell| {
        element(
            format!("GRID_BUTTON_{}_{}", cell.col(), cell.row()),
            GRID_LEFT + cell.col() as f32 * ELEMENT_SIZE,
            cell.row() as f32 * ELEMENT_SIZE,
        )
    }));
    elements
}

/// The grid pad under a point of the mock-up
pub fn cell_at(x: f32, y: f32) -> Option<Cell> {
    if x < GRID_LEFT || y < 0.0 {
        return None;
    }
    let col = ((x - GRID_LEFT) / ELEMENT_SIZE) as u32;
    let row = (y / ELEMENT_SIZE) as u32;
    if col >= GRID_WIDTH as u32 || row >= GRID_HEIGHT as u32 {
        return None;
    }
    Cell::new(col as u8, row as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oxi_one::CELL_COUNT;

    #[test]
    fn test_layout_fits_panel() {
        let (width, height) = physical_size();
        assert_eq!((width, height), (220.0, 80.0));

        let elements = layout();
        assert_eq!(elements.len(), 4 + KNOB_COUNT + CELL_COUNT);
        for element in &elements {
            assert!(element.bounds.x + element.bounds.width <= width, "{}", element.id);
            assert!(element.bounds.y + element.bounds.height <= height, "{}", element.id);
        }
    }

    #[test]
    fn test_cell_lookup_matches_layout() {
        for element in layout().iter().filter(|e| e.id.starts_with("GRID_BUTTON_")) {
            let center = (element.bounds.x + 5.0, element.bounds.y + 5.0);
            let cell = cell_at(center.0, center.1).unwrap();
            assert_eq!(element.id, format!("GRID_BUTTON_{}_{}", cell.col(), cell.row()));
            assert!(element.bounds.contains(center.0, center.1));
        }
        assert_eq!(cell_at(30.0, 10.0), None);
        assert_eq!(cell_at(219.0, 79.0), Cell::new(15, 7));
        assert_eq!(cell_at(219.0, 85.0), None);
        assert_eq!(cell_at(221.0, 5.0), None);
    }
}

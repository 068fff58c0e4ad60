use crate::host::Parameter;
use crate::oxi_one::KNOB_COUNT;

/// Parameters bound to the knobs are taken from this offset while shift is held
pub const SHIFT_OFFSET: usize = 4;

const NAME_WIDTH: usize = 10;

/// Multiplexes the four knobs over a page of up to eight parameters.
///
/// Every [`rebind`](Self::rebind) starts from scratch, so a knob never keeps pointing at a
/// parameter from an earlier page or layer.
#[derive(Debug, Clone, Default)]
pub struct ParameterPager {
    parameters: Vec<Parameter>,
    bindings: [Option<usize>; KNOB_COUNT],
    offset: usize,
}

impl ParameterPager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parameter page. Bindings are stale until the next rebind.
    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) {
        self.parameters = parameters;
    }

    /// Update one parameter in place. Returns false for unknown indices.
    pub fn set_parameter(&mut self, index: usize, parameter: Parameter) -> bool {
        match self.parameters.get_mut(index) {
            Some(slot) => {
                *slot = parameter;
                true
            }
            None => false,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Drop all knob bindings and bind the knobs in order to the parameters starting at the
    /// shift layer's offset.
    pub fn rebind(&mut self, shifted: bool) {
        self.offset = if shifted { SHIFT_OFFSET } else { 0 };
        self.bindings = [None; KNOB_COUNT];

        let window = (self.offset..self.parameters.len()).take(KNOB_COUNT);
        for (binding, index) in self.bindings.iter_mut().zip(window) {
            *binding = Some(index);
        }
        log::debug!("Knobs bound to {:?}", self.bindings);
    }

    /// The parameter index bound to `knob`
    pub fn binding(&self, knob: usize) -> Option<usize> {
        self.bindings.get(knob).copied().flatten()
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.iter().flatten().count()
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.bindings.contains(&Some(index))
    }

    /// Whether each parameter is on a knob right now, in parameter order
    pub fn indications(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (0..self.parameters.len()).map(move |index| (index, self.is_bound(index)))
    }

    /// The OLED page: one line per knob and a footer with the 1-based parameter numbers of the
    /// current window. The footer lands on the inverted status line.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|binding| match binding.and_then(|index| Some((index, self.parameters.get(index)?))) {
                Some((index, parameter)) => format_parameter(index, parameter),
                None => String::new(),
            })
            .collect();

        let footer = (1..=KNOB_COUNT)
            .map(|n| format!("({})", n + self.offset))
            .collect::<Vec<_>>()
            .join("   ");
        lines.push(footer);
        lines
    }
}

fn format_parameter(index: usize, parameter: &Parameter) -> String {
    let name: String = parameter.name.chars().take(NAME_WIDTH).collect();
    // truncated, so only a parameter at its maximum shows 100%
    let percent = (parameter.value.clamp(0.0, 1.0) * 100.0) as u32;
    format!("{}) {:<width$}: {:>3}%", index + 1, name, percent, width = NAME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(count: usize) -> ParameterPager {
        let mut pager = ParameterPager::new();
        pager.set_parameters(
            (0..count).map(|i| Parameter::new(format!("P{}", i + 1), (i as f32 * 0.25) % 1.0)).collect(),
        );
        pager
    }

    #[test]
    fn test_unshifted_page() {
        let mut pager = pager(8);
        pager.rebind(false);
        assert_eq!(
            pager.display_lines(),
            vec![
                "1) P1        :   0%",
                "2) P2        :  25%",
                "3) P3        :  50%",
                "4) P4        :  75%",
                "(1)   (2)   (3)   (4)",
            ]
        );
    }

    #[test]
    fn test_shifted_page() {
        let mut pager = pager(8);
        pager.rebind(true);
        assert_eq!(
            pager.display_lines(),
            vec![
                "5) P5        :   0%",
                "6) P6        :  25%",
                "7) P7        :  50%",
                "8) P8        :  75%",
                "(5)   (6)   (7)   (8)",
            ]
        );
        assert_eq!(pager.binding(0), Some(4));
        assert_eq!(pager.binding(3), Some(7));
    }

    #[test]
    fn test_rebind_count_and_offset() {
        for count in 0..10 {
            for shifted in [false, true] {
                let mut pager = pager(count);
                pager.rebind(!shifted);
                pager.rebind(shifted);
                assert!(pager.offset() == 0 || pager.offset() == SHIFT_OFFSET);
                assert_eq!(pager.bound_count(), KNOB_COUNT.min(count.saturating_sub(pager.offset())));
            }
        }
    }

    #[test]
    fn test_rebind_drops_stale_bindings() {
        let mut pager = pager(8);
        pager.rebind(true);
        pager.set_parameters(vec![Parameter::new("Cutoff", 1.0)]);
        pager.rebind(false);
        assert_eq!(pager.binding(0), Some(0));
        assert_eq!(pager.binding(1), None);
        assert_eq!(pager.indications().collect::<Vec<_>>(), vec![(0, true)]);
    }

    #[test]
    fn test_indications() {
        let mut pager = pager(6);
        pager.rebind(true);
        let indicated: Vec<usize> =
            pager.indications().filter(|&(_, on)| on).map(|(index, _)| index).collect();
        assert_eq!(indicated, vec![4, 5]);
    }

    #[test]
    fn test_line_format_truncates_and_pads() {
        let mut pager = ParameterPager::new();
        pager.set_parameters(vec![
            Parameter::new("Filter Cutoff Frequency", 1.0),
            Parameter::new("Q", 0.333),
        ]);
        pager.rebind(false);
        let lines = pager.display_lines();
        assert_eq!(lines[0], "1) Filter Cut: 100%");
        assert_eq!(lines[1], "2) Q         :  33%");
        assert_eq!(lines[2], "");
        assert_eq!(lines[4], "(1)   (2)   (3)   (4)");
    }

    #[test]
    fn test_percent_is_truncated() {
        let mut pager = ParameterPager::new();
        pager.set_parameters(vec![
            Parameter::new("A", 0.999),
            Parameter::new("B", 0.5049),
            Parameter::new("C", -0.2),
            Parameter::new("D", 3.0),
        ]);
        pager.rebind(false);
        let lines = pager.display_lines();
        assert_eq!(lines[0], "1) A         :  99%");
        assert_eq!(lines[1], "2) B         :  50%");
        assert_eq!(lines[2], "3) C         :   0%");
        assert_eq!(lines[3], "4) D         : 100%");
    }

    #[test]
    fn test_set_parameter() {
        let mut pager = pager(2);
        assert!(pager.set_parameter(1, Parameter::new("Drive", 0.5)));
        assert!(!pager.set_parameter(2, Parameter::new("Nope", 0.5)));
        assert_eq!(pager.parameters()[1].name, "Drive");
    }
}

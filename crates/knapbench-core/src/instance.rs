//! Knapsack problem instances and their text format.
//!
//! An instance source is plain text: a header line `<itemCount> <capacity>`
//! followed by exactly `itemCount` lines of `<value> <weight>`. Item indices
//! follow the order of the data lines, starting at 0. Blank lines are
//! skipped.

use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};

/// One item of a knapsack instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item {
    /// 0-based position among the instance's items.
    pub index: usize,
    pub value: u64,
    pub weight: u64,
}

impl Item {
    pub fn new(index: usize, value: u64, weight: u64) -> Self {
        Self {
            index,
            value,
            weight,
        }
    }

    /// Value per unit of weight.
    ///
    /// Zero-weight items with positive value rank above everything else;
    /// zero-weight, zero-value items rank as 0.
    pub fn ratio(&self) -> f64 {
        match (self.weight, self.value) {
            (0, 0) => 0.0,
            (0, _) => f64::INFINITY,
            (w, v) => v as f64 / w as f64,
        }
    }
}

/// A 0/1 knapsack problem: a capacity and an ordered list of items.
///
/// # Example
///
/// ```
/// use knapbench_core::Instance;
///
/// let instance: Instance = "3 50\n60 10\n100 20\n120 30\n".parse().unwrap();
/// assert_eq!(instance.capacity(), 50);
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.item(1).unwrap().value, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    capacity: u64,
    items: Vec<Item>,
}

impl Instance {
    /// Creates an instance, re-indexing the items by position.
    pub fn new(capacity: u64, items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Item { index, ..item })
            .collect();
        Self { capacity, items }
    }

    /// Creates an instance from `(value, weight)` pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use knapbench_core::Instance;
    ///
    /// let instance = Instance::from_pairs(10, &[(5, 3), (7, 4)]);
    /// assert_eq!(instance.total_weight(), 7);
    /// assert_eq!(instance.item(1).unwrap().index, 1);
    /// ```
    pub fn from_pairs(capacity: u64, pairs: &[(u64, u64)]) -> Self {
        Self::new(
            capacity,
            pairs
                .iter()
                .enumerate()
                .map(|(index, &(value, weight))| Item::new(index, value, weight)),
        )
    }

    /// Parses an instance from its text format.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines
            .next()
            .ok_or(ParseError::new(1, ParseErrorKind::MissingHeader))?;
        let mut fields = Fields::new(header_line, header);
        let declared = fields.next_u64("item count")?;
        let capacity = fields.next_u64("capacity")?;
        fields.finish()?;

        let declared = usize::try_from(declared).unwrap_or(usize::MAX);

        let mut items = Vec::with_capacity(declared.min(1 << 16));
        let mut last_line = header_line;
        let mut total_value = 0u64;
        while let Some((line_no, line)) = lines.next() {
            last_line = line_no;
            if items.len() == declared {
                let found = declared + 1 + lines.count();
                return Err(ParseError::new(
                    line_no,
                    ParseErrorKind::ItemCountMismatch { declared, found },
                ));
            }
            let mut fields = Fields::new(line_no, line);
            let value = fields.next_u64("value")?;
            let weight = fields.next_u64("weight")?;
            fields.finish()?;
            total_value = total_value
                .checked_add(value)
                .ok_or(ParseError::new(line_no, ParseErrorKind::TotalValueOverflow))?;
            items.push(Item::new(items.len(), value, weight));
        }

        if items.len() != declared {
            return Err(ParseError::new(
                last_line,
                ParseErrorKind::ItemCountMismatch {
                    declared,
                    found: items.len(),
                },
            ));
        }

        Ok(Self { capacity, items })
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item values, or `None` if it overflows a `u64`.
    ///
    /// Parsed instances always have a total; only instances built in code
    /// can overflow.
    pub fn total_value(&self) -> Option<u64> {
        self.items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(item.value))
    }

    /// Sum of all item weights, saturating at `u64::MAX`.
    pub fn total_weight(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.weight))
    }

    /// Number of cells in the exact solver's DP table.
    ///
    /// The table has `len + 1` rows and `min(capacity, total_weight) + 1`
    /// columns. Returns `None` if the count does not fit in a `u64`.
    pub fn table_cells(&self) -> Option<u64> {
        let rows = u64::try_from(self.items.len()).ok()?.checked_add(1)?;
        let cols = self.capacity.min(self.total_weight()).checked_add(1)?;
        rows.checked_mul(cols)
    }
}

impl FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whitespace-separated integer fields of one source line.
struct Fields<'a> {
    line: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    fn next_u64(&mut self, field: &'static str) -> Result<u64, ParseError> {
        let token = self
            .tokens
            .next()
            .ok_or(ParseError::new(self.line, ParseErrorKind::MissingField { field }))?;

        // Signed first, so negatives are reported as such.
        match token.parse::<i64>() {
            Ok(value) if value < 0 => Err(ParseError::new(
                self.line,
                ParseErrorKind::Negative { field, value },
            )),
            Ok(value) => Ok(value as u64),
            Err(_) => token.parse::<u64>().map_err(|_| {
                ParseError::new(
                    self.line,
                    ParseErrorKind::NotAnInteger {
                        field,
                        token: token.to_string(),
                    },
                )
            }),
        }
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            Some(token) => Err(ParseError::new(
                self.line,
                ParseErrorKind::TrailingField {
                    token: token.to_string(),
                },
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;

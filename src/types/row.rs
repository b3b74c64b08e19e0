//! Rows

use crate::types::Value;
use std::fmt;
use std::ops::Index;

/// A single row: values positioned according to the producing node's schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The empty row, used as the input of uncorrelated execution
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `self` values followed by `other` values
    pub fn concat(&self, other: &Row) -> Row {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());
        Row { values }
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Build a row from a list of values convertible into `Value`
#[macro_export]
macro_rules! row {
    () => {
        $crate::types::Row::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::types::Row::new(vec![$($crate::types::Value::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat() {
        let left = row![1];
        let right = row![10, "a"];
        let joined = left.concat(&right);
        assert_eq!(joined, row![1, 10, "a"]);
        assert_eq!(joined.to_string(), "[1, 10, 'a']");
    }
}

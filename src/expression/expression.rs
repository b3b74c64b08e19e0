//! Core expression types
//!
//! Expressions form a tree owned by the plan node that embeds them. An
//! expression is resolved only when it and all of its children are.

use crate::common::error::{PrismError, PrismResult};
use crate::expression::function::ScalarFunction;
use crate::types::{LogicalType, Row, Value};
use std::fmt;
use std::sync::Arc;

/// Scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant value
    Literal(Literal),
    /// Positional reference into the input row
    GetField(GetField),
    /// Renamed expression
    Alias(Alias),
    /// Function call awaiting resolution against the catalog
    UnresolvedFunction(UnresolvedFunction),
    /// Function call bound to an implementation
    Function(ScalarFunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    pub data_type: LogicalType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetField {
    pub index: usize,
    pub data_type: LogicalType,
    pub name: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub child: Box<Expression>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedFunction {
    pub name: String,
    pub arguments: Vec<Expression>,
}

/// Resolved function call
#[derive(Debug, Clone)]
pub struct ScalarFunctionCall {
    pub name: String,
    pub arguments: Vec<Expression>,
    implementation: Arc<dyn ScalarFunction>,
}

impl ScalarFunctionCall {
    pub fn new(
        name: impl Into<String>,
        implementation: Arc<dyn ScalarFunction>,
        arguments: Vec<Expression>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments,
            implementation,
        }
    }

    /// The implementation this call was bound to
    pub fn implementation(&self) -> &Arc<dyn ScalarFunction> {
        &self.implementation
    }
}

// Calls are identified by the name they were bound under; the registry maps
// each name to a single implementation.
impl PartialEq for ScalarFunctionCall {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arguments == other.arguments
    }
}

impl Expression {
    /// Literal whose type is taken from the value
    pub fn literal(value: impl Into<Value>) -> Self {
        let value = value.into();
        Expression::Literal(Literal {
            data_type: value.get_type(),
            value,
        })
    }

    pub fn get_field(index: usize, data_type: LogicalType, name: impl Into<String>, nullable: bool) -> Self {
        Expression::GetField(GetField {
            index,
            data_type,
            name: name.into(),
            nullable,
        })
    }

    pub fn alias(child: Expression, name: impl Into<String>) -> Self {
        Expression::Alias(Alias {
            child: Box::new(child),
            name: name.into(),
        })
    }

    pub fn unresolved_function(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::UnresolvedFunction(UnresolvedFunction {
            name: name.into(),
            arguments,
        })
    }

    /// Whether this expression and all of its children are bound
    pub fn resolved(&self) -> bool {
        match self {
            Expression::Literal(_) | Expression::GetField(_) => true,
            Expression::Alias(alias) => alias.child.resolved(),
            Expression::UnresolvedFunction(_) => false,
            Expression::Function(call) => call.arguments.iter().all(Expression::resolved),
        }
    }

    /// Get the children of this expression
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Literal(_) | Expression::GetField(_) => vec![],
            Expression::Alias(alias) => vec![alias.child.as_ref()],
            Expression::UnresolvedFunction(f) => f.arguments.iter().collect(),
            Expression::Function(call) => call.arguments.iter().collect(),
        }
    }

    /// Rebuild this expression over new children
    pub fn with_children(&self, children: Vec<Expression>) -> PrismResult<Expression> {
        let expected = self.children().len();
        if children.len() != expected {
            return Err(PrismError::invalid_children(self.kind(), children.len(), expected));
        }

        Ok(match self {
            Expression::Literal(_) | Expression::GetField(_) => self.clone(),
            Expression::Alias(alias) => {
                let mut children = children;
                match children.pop() {
                    Some(child) => Expression::alias(child, alias.name.clone()),
                    None => return Err(PrismError::invalid_children("Alias", 0, 1)),
                }
            }
            Expression::UnresolvedFunction(f) => {
                Expression::unresolved_function(f.name.clone(), children)
            }
            Expression::Function(call) => Expression::Function(ScalarFunctionCall::new(
                call.name.clone(),
                call.implementation.clone(),
                children,
            )),
        })
    }

    /// Variant name, used in structural errors
    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "Literal",
            Expression::GetField(_) => "GetField",
            Expression::Alias(_) => "Alias",
            Expression::UnresolvedFunction(_) => "UnresolvedFunction",
            Expression::Function(_) => "Function",
        }
    }

    /// Result type; `Invalid` while unresolved
    pub fn data_type(&self) -> LogicalType {
        match self {
            Expression::Literal(lit) => lit.data_type.clone(),
            Expression::GetField(field) => field.data_type.clone(),
            Expression::Alias(alias) => alias.child.data_type(),
            Expression::UnresolvedFunction(_) => LogicalType::Invalid,
            Expression::Function(call) => {
                let arg_types: Vec<LogicalType> =
                    call.arguments.iter().map(Expression::data_type).collect();
                call.implementation.return_type(&arg_types)
            }
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Expression::Literal(lit) => lit.value.is_null(),
            Expression::GetField(field) => field.nullable,
            Expression::Alias(alias) => alias.child.nullable(),
            Expression::UnresolvedFunction(_) | Expression::Function(_) => true,
        }
    }

    /// Column name used when this expression is projected
    pub fn column_name(&self) -> String {
        match self {
            Expression::Alias(alias) => alias.name.clone(),
            Expression::GetField(field) => field.name.clone(),
            other => other.to_string(),
        }
    }

    /// Evaluate this expression against a row
    pub fn eval(&self, row: &Row) -> PrismResult<Value> {
        match self {
            Expression::Literal(lit) => Ok(lit.value.clone()),
            Expression::GetField(field) => row.get(field.index).cloned().ok_or_else(|| {
                PrismError::Execution(format!(
                    "field {} ({}) out of bounds for row of length {}",
                    field.index,
                    field.name,
                    row.len()
                ))
            }),
            Expression::Alias(alias) => alias.child.eval(row),
            Expression::UnresolvedFunction(f) => Err(PrismError::Execution(format!(
                "unresolved function {} cannot be evaluated",
                f.name
            ))),
            Expression::Function(call) => {
                let args = call
                    .arguments
                    .iter()
                    .map(|arg| arg.eval(row))
                    .collect::<PrismResult<Vec<_>>>()?;
                call.implementation.invoke(&args)
            }
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Expression]) -> fmt::Result {
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit.value),
            Expression::GetField(field) => write!(f, "{}", field.name),
            Expression::Alias(alias) => write!(f, "{} as {}", alias.child, alias.name),
            Expression::UnresolvedFunction(func) => {
                write!(f, "{}(", func.name)?;
                write_arguments(f, &func.arguments)?;
                write!(f, ")")
            }
            Expression::Function(call) => {
                write!(f, "{}(", call.name.to_uppercase())?;
                write_arguments(f, &call.arguments)?;
                write!(f, ")")
            }
        }
    }
}

//! Function Management
//!
//! Registry of callable functions. Looking a function up yields a
//! constructor: given argument expressions it builds a resolved call.

use crate::common::error::{PrismError, PrismResult};
use crate::expression::function::{Abs, Coalesce, Concat, Length, Lower, ScalarFunction, Upper};
use crate::expression::{Expression, ScalarFunctionCall};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Number of arguments a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionArity {
    Exact(usize),
    AtLeast(usize),
}

impl FunctionArity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            FunctionArity::Exact(n) => count == *n,
            FunctionArity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for FunctionArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArity::Exact(n) => write!(f, "{}", n),
            FunctionArity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Registered function
#[derive(Debug, Clone)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Accepted argument count
    pub arity: FunctionArity,
    implementation: Arc<dyn ScalarFunction>,
}

impl Function {
    /// Create a new function
    pub fn new(
        name: impl Into<String>,
        arity: FunctionArity,
        implementation: Arc<dyn ScalarFunction>,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            implementation,
        }
    }

    /// Bind the function to its arguments, producing a resolved call
    pub fn call(&self, arguments: Vec<Expression>) -> PrismResult<Expression> {
        if !self.arity.accepts(arguments.len()) {
            return Err(PrismError::InvalidArgumentCount {
                function: self.name.clone(),
                given: arguments.len(),
                expected: self.arity.to_string(),
            });
        }

        Ok(Expression::Function(ScalarFunctionCall::new(
            self.name.clone(),
            self.implementation.clone(),
            arguments,
        )))
    }
}

/// Function registry for managing functions
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<Function>>,
}

impl FunctionRegistry {
    /// Create a new empty function registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in scalar functions
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Function::new("upper", FunctionArity::Exact(1), Arc::new(Upper)));
        registry.register(Function::new("lower", FunctionArity::Exact(1), Arc::new(Lower)));
        registry.register(Function::new("length", FunctionArity::Exact(1), Arc::new(Length)));
        registry.register(Function::new("abs", FunctionArity::Exact(1), Arc::new(Abs)));
        registry.register(Function::new("concat", FunctionArity::AtLeast(1), Arc::new(Concat)));
        registry.register(Function::new(
            "coalesce",
            FunctionArity::AtLeast(1),
            Arc::new(Coalesce),
        ));
        registry
    }

    /// Register a function, replacing any function with the same name
    pub fn register(&mut self, function: Function) {
        self.functions
            .insert(function.name.to_lowercase(), Arc::new(function));
    }

    /// Lookup a function by name, ignoring case
    pub fn lookup(&self, name: &str) -> PrismResult<Arc<Function>> {
        self.functions
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| PrismError::FunctionNotFound(name.to_string()))
    }

    /// List all function names
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get function count
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

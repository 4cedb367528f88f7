//! Two-operand calculator behind `POST /api/calculate`.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// `None` for anything but `add`, `sub`, `mul` or `div`.
    pub fn parse(tag: &str) -> Option<Op> {
        match tag {
            "add" => Some(Op::Add),
            "sub" => Some(Op::Sub),
            "mul" => Some(Op::Mul),
            "div" => Some(Op::Div),
            _ => None,
        }
    }

    /// Division by zero is NaN, not infinity.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div if b == 0.0 => f64::NAN,
            Op::Div => a / b,
        }
    }
}

/// `{"result": x}`; serde_json writes non-finite numbers as `null`.
#[derive(Serialize, Debug, PartialEq)]
pub struct CalcResponse {
    pub result: f64,
}

/// Evaluate a decoded form. Missing or unparsable operands are 0, a missing
/// `op` is `add` and an unknown one yields NaN.
pub fn evaluate(form: &HashMap<String, String>) -> CalcResponse {
    let operand = |key: &str| {
        form.get(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    let (a, b) = (operand("a"), operand("b"));
    let op = form.get("op").map(String::as_str).unwrap_or("add");

    let result = match Op::parse(op) {
        Some(op) => op.apply(a, b),
        None => {
            tracing::warn!(op, "unknown calculator operation");
            f64::NAN
        }
    };
    CalcResponse { result }
}

//! The opcode interpreter: one token per step.
//!
//! Dispatch families, in match order: label definitions (no-ops),
//! status reads, actuators (which charge energy), stack manipulation,
//! arithmetic and comparison, control flow, variables, and finally
//! literals. Anything left over is an unknown token and faults.

use fray_core::{Fault, Heading, Value};

use crate::bot::{Bot, STACK_LIMIT};
use crate::context::{Shot, TickContext};

/// Floor division: the quotient rounds toward negative infinity.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && (a < 0) != (b < 0) {
        q.wrapping_sub(1)
    } else {
        q
    }
}

/// Floored remainder: takes the sign of the divisor.
fn floor_rem(a: i64, b: i64) -> i64 {
    a.wrapping_sub(floor_div(a, b).wrapping_mul(b))
}

/// Shape description of an operand pair for mismatch diagnostics.
fn pair_shape(a: &Value, b: &Value) -> &'static str {
    match (a, b) {
        (Value::Int(_), Value::Int(_)) => "two integers",
        (Value::Str(_), Value::Str(_)) => "two strings",
        (Value::Int(_), Value::Str(_)) => "integer and string",
        (Value::Str(_), Value::Int(_)) => "string and integer",
    }
}

fn shape_mismatch(op: &'static str, a: &Value, b: &Value) -> Fault {
    Fault::Type {
        op,
        expected: "two integers or two strings",
        found: pair_shape(a, b),
    }
}

impl Bot {
    /// Execute exactly one opcode.
    ///
    /// Reads the token at the program counter, advances past it, counts
    /// the operation against the tick budget, then dispatches. Any
    /// precondition violation returns a [`Fault`]; the caller decides
    /// what a fault means (the tick driver turns it into bot death).
    pub(crate) fn step(&mut self, ctx: &mut TickContext<'_>) -> Result<(), Fault> {
        if self.stack.len() > STACK_LIMIT {
            return Err(Fault::StackOverflow);
        }
        let token = match self.program.token(self.pc) {
            Some(t) => t.to_string(),
            None => {
                return Err(Fault::PcOutOfRange {
                    pc: self.pc as i64,
                })
            }
        };
        self.pc += 1;
        self.ops_executed += 1;

        // A label definition does nothing by itself.
        if self.program.is_label_definition(&token) {
            return Ok(());
        }

        match token.as_str() {
            // ── Status: push one reading ────────────────────────
            "X" => self.stack.push(Value::Int(self.position.x.floor() as i64)),
            "Y" => self.stack.push(Value::Int(self.position.y.floor() as i64)),
            "TRACKS" => self.stack.push(Value::Int(i64::from(self.tracks.degrees()))),
            "AIM" => self.stack.push(Value::Int(i64::from(self.aim.degrees()))),
            "SPEED" => self.stack.push(Value::Int(self.speed)),
            "HEALTH" => self.stack.push(Value::Int(self.health.trunc() as i64)),
            "ENERGY" => self.stack.push(Value::Int(self.energy)),
            "SCAN" => {
                let distance = ctx.scan(self.position, self.aim);
                self.stack.push(Value::Int(distance as i64));
            }

            // ── Actuators: consume energy to act ────────────────
            // Energy is always debited, into the negative; the tick
            // driver stops a bot whose energy has gone negative.
            "SETTRACKS" => {
                let degrees = self.pop_int("SETTRACKS")?;
                let new = Heading::from_degrees(degrees);
                self.energy -= self.tracks.turn_cost(new);
                self.tracks = new;
            }
            "SETAIM" => {
                let degrees = self.pop_int("SETAIM")?;
                self.energy -= 2;
                self.aim = Heading::from_degrees(degrees);
            }
            "SETSPEED" => {
                let speed = self.pop_int("SETSPEED")?.clamp(0, 10);
                self.energy -= speed;
                self.speed = speed;
            }
            "FIRE" => {
                let power = self.pop_int("FIRE")?.clamp(1, 10);
                self.energy -= 2 * power;
                ctx.shots.push(Shot {
                    position: self.position,
                    direction: self.aim,
                    power,
                });
            }

            // ── Stack manipulation ──────────────────────────────
            "DUP" => {
                let top = self
                    .stack
                    .last()
                    .cloned()
                    .ok_or(Fault::StackUnderflow { op: "DUP" })?;
                self.stack.push(top);
            }
            "DROP" => {
                self.pop("DROP")?;
            }
            "SWAP" => {
                if self.stack.len() < 2 {
                    return Err(Fault::StackUnderflow { op: "SWAP" });
                }
                let n = self.stack.len();
                self.stack.swap(n - 1, n - 2);
            }
            "IFELSE" => {
                let if_false = self.pop("IFELSE")?;
                let if_true = self.pop("IFELSE")?;
                let condition = self.pop("IFELSE")?;
                self.stack.push(if condition.is_truthy() {
                    if_true
                } else {
                    if_false
                });
            }

            // ── Arithmetic and comparison ───────────────────────
            // Top of stack is the right operand. Addition and the
            // orderings also work on string pairs; the rest are
            // integer-only.
            "+" => {
                let b = self.pop("+")?;
                let a = self.pop("+")?;
                let result = match (a, b) {
                    (Value::Int(a), Value::Int(b)) => Value::Int(a.wrapping_add(b)),
                    (Value::Str(a), Value::Str(b)) => Value::Str(a + &b),
                    (a, b) => return Err(shape_mismatch("+", &a, &b)),
                };
                self.stack.push(result);
            }
            "-" => {
                let b = self.pop_int("-")?;
                let a = self.pop_int("-")?;
                self.stack.push(Value::Int(a.wrapping_sub(b)));
            }
            "*" => {
                let b = self.pop_int("*")?;
                let a = self.pop_int("*")?;
                self.stack.push(Value::Int(a.wrapping_mul(b)));
            }
            "/" => {
                let b = self.pop_int("/")?;
                let a = self.pop_int("/")?;
                if b == 0 {
                    return Err(Fault::DivisionByZero);
                }
                self.stack.push(Value::Int(floor_div(a, b)));
            }
            "%" => {
                let b = self.pop_int("%")?;
                let a = self.pop_int("%")?;
                if b == 0 {
                    return Err(Fault::DivisionByZero);
                }
                self.stack.push(Value::Int(floor_rem(a, b)));
            }
            "<" => {
                let b = self.pop("<")?;
                let a = self.pop("<")?;
                let less = match (&a, &b) {
                    (Value::Int(x), Value::Int(y)) => x < y,
                    (Value::Str(x), Value::Str(y)) => x < y,
                    _ => return Err(shape_mismatch("<", &a, &b)),
                };
                self.stack.push(Value::Int(i64::from(less)));
            }
            ">" => {
                let b = self.pop(">")?;
                let a = self.pop(">")?;
                let greater = match (&a, &b) {
                    (Value::Int(x), Value::Int(y)) => x > y,
                    (Value::Str(x), Value::Str(y)) => x > y,
                    _ => return Err(shape_mismatch(">", &a, &b)),
                };
                self.stack.push(Value::Int(i64::from(greater)));
            }
            "==" => {
                let b = self.pop("==")?;
                let a = self.pop("==")?;
                self.stack.push(Value::Int(i64::from(a == b)));
            }

            // ── Control flow ────────────────────────────────────
            // Targets are an integer token index or a string label
            // name. CALL pushes the already-advanced program counter,
            // so RETURN finds the index of the next instruction.
            "JUMP" => {
                self.pc = self.pop_target("JUMP")?;
            }
            "RETURN" => {
                self.pc = self.pop_target("RETURN")?;
            }
            "JUMPIF" => {
                let target = self.pop_target("JUMPIF")?;
                let condition = self.pop("JUMPIF")?;
                if condition.is_truthy() {
                    self.pc = target;
                }
            }
            "CALL" => {
                let target = self.pop_target("CALL")?;
                self.stack.push(Value::Int(self.pc as i64));
                self.pc = target;
            }
            "CALLIF" => {
                let target = self.pop_target("CALLIF")?;
                let condition = self.pop("CALLIF")?;
                if condition.is_truthy() {
                    self.stack.push(Value::Int(self.pc as i64));
                    self.pc = target;
                }
            }

            // ── Variables ───────────────────────────────────────
            "STORE" => {
                let name = self.pop("STORE")?;
                let value = self.pop("STORE")?;
                match name {
                    Value::Str(name) => {
                        self.variables.insert(name, value);
                    }
                    other => {
                        return Err(Fault::Type {
                            op: "STORE",
                            expected: "string",
                            found: other.shape(),
                        })
                    }
                }
            }
            "LOAD" => match self.pop("LOAD")? {
                Value::Str(name) => {
                    let value = self
                        .variables
                        .get(&name)
                        .cloned()
                        .unwrap_or(Value::Int(0));
                    self.stack.push(value);
                }
                other => {
                    return Err(Fault::Type {
                        op: "LOAD",
                        expected: "string",
                        found: other.shape(),
                    })
                }
            },

            // ── Literals ────────────────────────────────────────
            _ => self.literal(&token)?,
        }

        Ok(())
    }

    fn pop(&mut self, op: &'static str) -> Result<Value, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow { op })
    }

    fn pop_int(&mut self, op: &'static str) -> Result<i64, Fault> {
        match self.pop(op)? {
            Value::Int(n) => Ok(n),
            other => Err(Fault::Type {
                op,
                expected: "integer",
                found: other.shape(),
            }),
        }
    }

    /// Resolve a control-flow target: integers index the token stream
    /// directly, strings go through the label index.
    fn pop_target(&mut self, op: &'static str) -> Result<usize, Fault> {
        match self.pop(op)? {
            Value::Int(index) => {
                usize::try_from(index).map_err(|_| Fault::PcOutOfRange { pc: index })
            }
            Value::Str(name) => self
                .program
                .label(&name)
                .ok_or(Fault::UndefinedLabel { name }),
        }
    }

    /// Push a string or numeric literal, or fault on an unknown token.
    fn literal(&mut self, token: &str) -> Result<(), Fault> {
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            self.stack
                .push(Value::Str(token[1..token.len() - 1].to_string()));
            return Ok(());
        }
        let number: f64 = token.parse().map_err(|_| Fault::UnknownToken {
            token: token.to_string(),
        })?;
        if !number.is_finite() {
            return Err(Fault::UnknownToken {
                token: token.to_string(),
            });
        }
        self.stack.push(Value::Int(number.trunc() as i64));
        Ok(())
    }
}

//! Variables: dynamic typing, assignment forms, operators, strings and conversions

use super::{row, section, CheatRow, Lesson, LessonName, Printed};
use crate::builtins::{
    binary, format_positional, py_add, to_bool, to_float, to_int, to_str, type_of, BinOp, Console,
};
use crate::core::Value;
use crate::errors::Result;
use crate::runtime::{CallArgs, Namespace, PyFunction, Signature};

const WIDTH: usize = 50;

const CHEATSHEET: &[CheatRow] = &[
    row("Declare", "age = 25", "let age = 25"),
    row("Absent value", "None", "null"),
    row("Booleans", "True / False", "true / false"),
    row("Output", "print()", "console.log()"),
    row("Template string", "f\"{var}\"", "`${var}`"),
    row("Naming", "snake_case", "camelCase"),
    row("Semicolons", "not needed", "optional"),
    row("Conversions", "int(s), float(s), str(n)", "parseInt, parseFloat, String"),
];

pub struct Variables;

impl Lesson for Variables {
    fn name(&self) -> LessonName {
        LessonName::Variables
    }

    fn title(&self) -> &'static str {
        "variables: dynamic types, assignment, operators, strings, conversions, None"
    }

    fn separator_width(&self) -> usize {
        WIDTH
    }

    fn sections(&self) -> usize {
        1
    }

    fn cheatsheet(&self) -> &'static [CheatRow] {
        CHEATSHEET
    }

    fn run(&self, c: &mut Console) -> Result<()> {
        // scalars: the type is whatever was assigned last
        let age = Value::Int(25);
        let price = Value::Float(99.99);
        let name = Value::str("Zhang San");
        let message = Value::str("This is\na multi-line\nstring");
        let is_student = Value::Bool(true);

        // naming is convention only
        let user_name = Value::str("Li Si");
        let user_name_camel = user_name.clone();

        // rebinding x leaves y alone
        let mut x = Value::Int(10);
        let y = x.clone();
        x = Value::Int(20);

        let [a, b, cc] = Value::tuple([Value::Int(1), Value::Int(2), Value::Int(3)]).unpack::<3>()?;

        // x = y = z = 0
        let zero = Value::Int(0);
        let (chain_x, chain_y, chain_z) = (zero.clone(), zero.clone(), zero);

        c.print(format!("type of age: {}", type_of(&age)))?;
        c.print(format!("type of price: {}", type_of(&price)))?;
        c.print(format!("type of name: {}", type_of(&name)))?;
        c.print(format!("type of is_student: {}", type_of(&is_student)))?;

        let num1 = Value::Int(10);
        let num2 = Value::Int(3);
        let addition = py_add(&num1, &num2)?;

        let first_name = Value::str("Zhang");
        let last_name = Value::str("San");
        let full_name = py_add(&first_name, &last_name)?;
        let greeting = Value::str(format!("Hello, {}!", full_name));
        let greeting2 = format_positional("Hello, {}!", &[full_name.clone()])?;

        section(c, LessonName::Variables, WIDTH, "Variable demo output:")?;
        c.print(format!("name: {}, age: {}", name, age))?;
        c.print(format!("price: {} yuan", price))?;
        c.print(format!("is a student: {}", is_student))?;
        c.print(format!("full greeting: {}", greeting))?;
        c.print(format!("arithmetic: {} + {} = {}", num1, num2, addition))?;
        c.print(format!("string concatenation: {} + {} = {}", first_name, last_name, full_name))?;

        for op in [BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::FloorDiv, BinOp::Mod, BinOp::Pow] {
            c.print(format!("arithmetic: {} {} {} = {}", num1, op.symbol(), num2, binary(op, &num1, &num2)?))?;
        }
        let (neg, two) = (Value::Int(-7), Value::Int(2));
        for op in [BinOp::FloorDiv, BinOp::Mod] {
            c.print(format!("floor rounding: {} {} {} = {}", neg, op.symbol(), two, binary(op, &neg, &two)?))?;
        }

        c.print(format!("format(): {}", greeting2))?;
        c.print(format!("multi-line string:\n{}", message))?;
        c.print(format!("snake_case user_name = {}, camelCase userName = {}", user_name, user_name_camel))?;
        c.print(format!("reassignment: x = {}, y = {}", x, y))?;
        c.print(format!("multiple assignment: a = {}, b = {}, c = {}", a, b, cc))?;
        c.print(format!("chained assignment: x = {}, y = {}, z = {}", chain_x, chain_y, chain_z))?;

        let str_num = Value::str("123");
        c.print(format!(
            "conversions: int('123') = {}, float('123') = {}, str(123) = {}, bool(1) = {}, bool(0) = {}",
            to_int(&str_num)?,
            to_float(&str_num)?,
            to_str(&Value::Int(123)).repr(),
            to_bool(&Value::Int(1)),
            to_bool(&Value::Int(0))
        ))?;
        c.print(format!(
            "empty values: {}, {}, {}, {}",
            Value::None,
            Value::str("").repr(),
            Value::empty_list(),
            Value::empty_dict()
        ))?;

        scope_function(c)?;

        c.js(r#"let age = 25;
const name = "Zhang San";
let value = null;
const [a, b, c] = [1, 2, 3];
console.log(typeof age); // "number""#)
    }
}

fn scope_function(c: &mut Console) -> Result<()> {
    let module = Namespace::new();
    module.set("global_var", "I am a global variable");
    let out = Printed::default();

    let test_function = {
        let (module, out) = (module.clone(), out.clone());
        PyFunction::new(Signature::new("test_function"), move |_| {
            let mut scope = module.enter();
            scope.assign("local_var", "I am a local variable");
            out.say(format!("global inside a function: {}", scope.lookup("global_var")?));
            out.say(format!("local inside a function: {}", scope.lookup("local_var")?));
            Ok(Value::None)
        })?
    };
    test_function.call(CallArgs::new())?;
    out.flush_to(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> String {
        let (mut console, buffer) = Console::capture();
        Variables.run(&mut console).unwrap();
        buffer.contents()
    }

    #[test]
    fn test_type_lines_come_first() {
        let text = transcript();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "type of age: <class 'int'>");
        assert_eq!(lines[3], "type of is_student: <class 'bool'>");
        assert_eq!(lines[4], "=".repeat(50));
        assert_eq!(lines[5], "Variable demo output:");
        assert_eq!(lines[6], "=".repeat(50));
        assert_eq!(lines[7], "name: Zhang San, age: 25");
        assert_eq!(*lines.last().unwrap(), "local inside a function: I am a local variable");
    }

    #[test]
    fn test_arithmetic_lines() {
        let text = transcript();
        assert!(text.contains("arithmetic: 10 + 3 = 13\n"));
        assert!(text.contains("arithmetic: 10 / 3 = 3.3333333333333335\n"));
        assert!(text.contains("arithmetic: 10 // 3 = 3\n"));
        assert!(text.contains("arithmetic: 10 ** 3 = 1000\n"));
        assert!(text.contains("floor rounding: -7 // 2 = -4\n"));
        assert!(text.contains("floor rounding: -7 % 2 = 1\n"));
    }

    #[test]
    fn test_conversions_and_empties() {
        let text = transcript();
        assert!(text.contains("int('123') = 123, float('123') = 123.0, str(123) = '123', bool(1) = True, bool(0) = False"));
        assert!(text.contains("empty values: None, '', [], {}\n"));
        assert!(text.contains("format(): Hello, ZhangSan!\n"));
        assert!(text.contains("reassignment: x = 20, y = 10\n"));
    }
}

//! Functions: parameters, binding rules, closures, scope and recursion

use super::{closing, row, section, CheatRow, Lesson, LessonName, Printed};
use crate::builtins::{
    compare, py_add, py_filter, py_map, py_mod, py_mul, py_pow, py_sub, sort_list, type_of, CmpOp, Console,
};
use crate::core::{Type, Value};
use crate::errors::Result;
use crate::runtime::{call_value, CallArgs, Namespace, PyFunction, Signature};

const WIDTH: usize = 60;

const CHEATSHEET: &[CheatRow] = &[
    row("Define", "def f(a):", "function f(a) {}"),
    row("Anonymous", "lambda x: x * 2", "(x) => x * 2"),
    row("Default argument", "def f(a=1):", "function f(a = 1) {}"),
    row("Rest arguments", "*args (a tuple)", "...args (an array)"),
    row("Named extras", "**kwargs (a dict)", "an options object"),
    row("Type hints", "def f(a: int) -> int:", "function f(a: number): number"),
    row("Multiple returns", "tuple unpacking", "array/object destructuring"),
    row("Rebind an outer name", "global x", "plain assignment"),
    row("Closures", "supported", "supported"),
    row("Decorators", "@decorator", "TS experimental only"),
];

pub struct Functions;

impl Lesson for Functions {
    fn name(&self) -> LessonName {
        LessonName::Functions
    }

    fn title(&self) -> &'static str {
        "functions: defaults, keyword arguments, *args/**kwargs, lambdas, closures, global"
    }

    fn sections(&self) -> usize {
        16
    }

    fn cheatsheet(&self) -> &'static [CheatRow] {
        CHEATSHEET
    }

    fn run(&self, c: &mut Console) -> Result<()> {
        basic(c)?;
        return_values(c)?;
        defaults(c)?;
        keywords(c)?;
        varargs(c)?;
        varkw(c)?;
        mixed(c)?;
        multiple_returns(c)?;
        lambdas(c)?;
        scope(c)?;
        closures(c)?;
        type_hints(c)?;
        docstrings(c)?;
        higher_order(c)?;
        recursion(c)?;
        practical(c)?;
        closing(c, WIDTH, "Functions demo complete!")
    }
}

fn header(c: &mut Console, title: &str) -> Result<()> {
    section(c, LessonName::Functions, WIDTH, title)
}

fn ints(items: &[i64]) -> Vec<Value> {
    items.iter().map(|&n| Value::Int(n)).collect()
}

fn basic(c: &mut Console) -> Result<()> {
    header(c, "1. Basic function definition")?;

    let greet = PyFunction::new(Signature::new("greet").required("name"), |args| {
        Ok(Value::str(format!("Hello, {}!", args.get("name")?)))
    })?
    .with_doc("A simple greeting");

    let result = greet.call1("Zhang San")?;
    c.print(format!("  {}", result))?;

    c.js(r#"function greet(name) {
  return `Hello, ${name}!`;
}
const result = greet("Zhang San");"#)?;
    c.blank()
}

fn return_values(c: &mut Console) -> Result<()> {
    header(c, "2. Functions that return a value")?;

    let add = PyFunction::new(Signature::new("add").required("a").required("b"), |args| {
        py_add(args.get("a")?, args.get("b")?)
    })?;
    let multiply = PyFunction::new(Signature::new("multiply").required("a").required("b"), |args| {
        py_mul(args.get("a")?, args.get("b")?)
    })?;

    c.print(format!("  add(3, 5) = {}", add.call2(3, 5)?))?;
    c.print(format!("  multiply(4, 6) = {}", multiply.call2(4, 6)?))?;

    // no return statement: the call evaluates to None
    let out = Printed::default();
    let print_hello = {
        let out = out.clone();
        PyFunction::new(Signature::new("print_hello"), move |_| {
            out.say("    Hello!");
            Ok(Value::None)
        })?
    };
    let result = print_hello.call(CallArgs::new())?;
    out.flush_to(c)?;
    c.print(format!("  return value of print_hello(): {}", result))?;

    c.js("function add(a, b) { return a + b; }
// a JS function without return yields undefined")?;
    c.blank()
}

fn defaults(c: &mut Console) -> Result<()> {
    header(c, "3. Default parameters (like JS default parameters)")?;

    let greet_with_default = PyFunction::new(
        Signature::new("greet_with_default").required("name").default("greeting", "Hello"),
        |args| Ok(Value::str(format!("{}, {}!", args.get("greeting")?, args.get("name")?))),
    )?;
    c.print(format!("  {}", greet_with_default.call1("Li Si")?))?;
    c.print(format!("  {}", greet_with_default.call2("Li Si", "Good morning")?))?;
    c.blank()?;

    // the default list is created once, when the function is defined
    let add_item = PyFunction::new(
        Signature::new("add_item").required("item").default("items", Value::empty_list()),
        |args| {
            let items = args.get("items")?.clone();
            items.append(args.get("item")?.clone())?;
            Ok(items)
        },
    )?;
    c.print("  Careful: a mutable default is shared by every call that omits it")?;
    c.print(format!("  add_item('a') -> {}", add_item.call1("a")?))?;
    c.print(format!("  add_item('b') -> {}", add_item.call1("b")?))?;

    let add_item_safe = PyFunction::new(
        Signature::new("add_item_safe").required("item").default("items", Value::None),
        |args| {
            let items = args.get("items")?;
            let items = if items.is_none() { Value::empty_list() } else { items.clone() };
            items.append(args.get("item")?.clone())?;
            Ok(items)
        },
    )?;
    c.print("  Safe pattern: default to None and create the list inside")?;
    c.print(format!("  add_item_safe('a') -> {}", add_item_safe.call1("a")?))?;
    c.print(format!("  add_item_safe('b') -> {}", add_item_safe.call1("b")?))?;

    c.js(r#"function greetWithDefault(name, greeting = "Hello") {
  return `${greeting}, ${name}!`;
}
// JS evaluates default expressions on every call, so [] is fresh each time"#)?;
    c.blank()
}

fn keywords(c: &mut Console) -> Result<()> {
    header(c, "4. Keyword arguments (argument order can change)")?;

    let create_person = PyFunction::new(
        Signature::new("create_person").required("name").required("age").required("city"),
        |args| {
            Ok(Value::str(format!(
                "name: {}, age: {}, city: {}",
                args.get("name")?,
                args.get("age")?,
                args.get("city")?
            )))
        },
    )?
    .with_doc("Describe a person");

    let person1 = create_person.call(CallArgs::new().arg("Wang Wu").arg(25).arg("Beijing"))?;
    c.print(format!("  positional: {}", person1))?;

    let person2 = create_person.call(CallArgs::new().kw("city", "Shanghai").kw("name", "Zhao Liu").kw("age", 30))?;
    c.print(format!("  keyword: {}", person2))?;

    // positional arguments must come before keyword arguments
    let person3 = create_person.call(CallArgs::new().arg("Sun Qi").kw("city", "Guangzhou").kw("age", 28))?;
    c.print(format!("  mixed: {}", person3))?;

    c.js(r#"function createPerson({ name, age, city }) { ... }
createPerson({ city: "Shanghai", name: "Zhao Liu", age: 30 });"#)?;
    c.blank()
}

fn varargs(c: &mut Console) -> Result<()> {
    header(c, "5. *args (variadic positional, like JS ...rest)")?;

    let sum_numbers = PyFunction::new(Signature::new("sum_numbers").varargs("args"), |args| {
        let mut total = Value::Int(0);
        for num in args.extra_positional() {
            total = py_add(&total, num)?;
        }
        Ok(total)
    })?;
    c.print(format!(
        "  sum_numbers(1, 2, 3) = {}",
        sum_numbers.call(CallArgs::positional(ints(&[1, 2, 3])))?
    ))?;
    c.print(format!(
        "  sum_numbers(10, 20, 30, 40) = {}",
        sum_numbers.call(CallArgs::positional(ints(&[10, 20, 30, 40])))?
    ))?;

    let out = Printed::default();
    let show_args = {
        let out = out.clone();
        PyFunction::new(Signature::new("show_args").varargs("args"), move |args| {
            out.say(format!("  type of args: {}", type_of(&args.varargs())));
            out.say(format!("  args contents: {}", args.varargs()));
            Ok(Value::None)
        })?
    };
    show_args.call(CallArgs::positional(ints(&[1, 2, 3])))?;
    out.flush_to(c)?;

    c.js("function sumNumbers(...args) {
  return args.reduce((a, b) => a + b, 0);
}")?;
    c.blank()
}

fn varkw(c: &mut Console) -> Result<()> {
    header(c, "6. **kwargs (variadic keyword, like a JS options object)")?;

    let create_profile = PyFunction::new(Signature::new("create_profile").varkw("kwargs"), |args| {
        let profile = Value::empty_dict();
        for (key, value) in args.extra_keywords() {
            profile.set_item(key.clone(), value.clone())?;
        }
        Ok(profile)
    })?;
    let profile = create_profile.call(
        CallArgs::new()
            .kw("name", "Xiao Ming")
            .kw("age", 20)
            .kw("city", "Shenzhen")
            .kw("hobby", "coding"),
    )?;
    c.print(format!("  profile: {}", profile))?;

    let out = Printed::default();
    let show_kwargs = {
        let out = out.clone();
        PyFunction::new(Signature::new("show_kwargs").varkw("kwargs"), move |args| {
            out.say(format!("  type of kwargs: {}", type_of(&args.varkw())));
            out.say(format!("  kwargs contents: {}", args.varkw()));
            Ok(Value::None)
        })?
    };
    show_kwargs.call(CallArgs::new().kw("a", 1).kw("b", 2).kw("c", 3))?;
    out.flush_to(c)?;

    c.js("function createProfile(options) {
  return { ...options };
}")?;
    c.blank()
}

fn mixed(c: &mut Console) -> Result<()> {
    header(c, "7. Mixing positional, default, *args and **kwargs")?;

    let out = Printed::default();
    let complex_function = {
        let out = out.clone();
        PyFunction::new(
            Signature::new("complex_function")
                .required("name")
                .default("age", 18)
                .varargs("args")
                .varkw("kwargs"),
            move |args| {
                out.say(format!("  name: {}", args.get("name")?));
                out.say(format!("  age: {}", args.get("age")?));
                out.say(format!("  *args: {}", args.varargs()));
                out.say(format!("  **kwargs: {}", args.varkw()));
                Ok(Value::None)
            },
        )?
        .with_doc("Parameter order: required, defaulted, *args, **kwargs")
    };

    complex_function.call(
        CallArgs::new()
            .arg("Xiao Hong")
            .arg(25)
            .arg("hobby1")
            .arg("hobby2")
            .kw("city", "Beijing")
            .kw("hobby", "reading"),
    )?;
    out.flush_to(c)?;

    c.js("function complexFunction(name, age = 18, ...rest) { ... }")?;
    c.blank()
}

fn multiple_returns(c: &mut Console) -> Result<()> {
    header(c, "8. Returning several values (a tuple you can unpack)")?;

    let get_name_and_age = PyFunction::new(Signature::new("get_name_and_age"), |_| {
        Ok(Value::tuple(vec![Value::str("Zhang San"), Value::Int(25)]))
    })?;

    let [name, age] = get_name_and_age.call(CallArgs::new())?.unpack::<2>()?;
    c.print(format!("  name: {}, age: {}", name, age))?;

    let result = get_name_and_age.call(CallArgs::new())?;
    c.print(format!("  whole result (tuple): {}", result))?;

    c.js(r#"function getNameAndAge() {
  return { name: "Zhang San", age: 25 };
}
const { name, age } = getNameAndAge();"#)?;
    c.blank()
}

fn lambdas(c: &mut Console) -> Result<()> {
    header(c, "9. Lambda functions (anonymous, like JS arrow functions)")?;

    let square = PyFunction::lambda(&["x"], |args| py_pow(args.get("x")?, &Value::Int(2)))?.into_value();
    c.print(format!("  square(5) = {}", call_value(&square, CallArgs::new().arg(5))?))?;

    let add = PyFunction::lambda(&["x", "y"], |args| py_add(args.get("x")?, args.get("y")?))?;
    c.print(format!("  add(3, 4) = {}", add.call2(3, 4)?))?;

    let numbers = Value::list(ints(&[1, 2, 3, 4, 5]));
    let squared = Value::list(py_map(&square, numbers.items()?)?);
    c.print(format!("  numbers: {}", numbers))?;
    c.print(format!("  squared: {}", squared))?;

    let is_even = PyFunction::lambda(&["x"], |args| {
        let rem = py_mod(args.get("x")?, &Value::Int(2))?;
        Ok(Value::Bool(rem == Value::Int(0)))
    })?
    .into_value();
    let evens = Value::list(py_filter(&is_even, numbers.items()?)?);
    c.print(format!("  evens: {}", evens))?;

    c.js("const square = (x) => x ** 2;
const squared = numbers.map(x => x ** 2);
const evens = numbers.filter(x => x % 2 === 0);")?;
    c.blank()
}

fn scope(c: &mut Console) -> Result<()> {
    header(c, "10. Variable scope (the global keyword)")?;

    let module = Namespace::new();
    module.set("global_var", "I am a global variable");
    let out = Printed::default();

    let read_global = {
        let (module, out) = (module.clone(), out.clone());
        PyFunction::new(Signature::new("read_global"), move |_| {
            let scope = module.enter();
            out.say(format!("  reading the global inside a function: {}", scope.lookup("global_var")?));
            Ok(Value::None)
        })?
    };
    read_global.call(CallArgs::new())?;
    out.flush_to(c)?;

    // without a declaration the assignment creates a local
    let shadow_global = {
        let (module, out) = (module.clone(), out.clone());
        PyFunction::new(Signature::new("shadow_global"), move |_| {
            let mut scope = module.enter();
            scope.assign("global_var", "I am a local shadow");
            out.say(format!("  assigning without global makes a local: {}", scope.lookup("global_var")?));
            Ok(Value::None)
        })?
    };
    shadow_global.call(CallArgs::new())?;
    out.flush_to(c)?;
    c.print(format!("  global after shadowing: {}", module.get("global_var")?))?;

    let modify_global = {
        let (module, out) = (module.clone(), out.clone());
        PyFunction::new(Signature::new("modify_global"), move |_| {
            let mut scope = module.enter();
            scope.declare_global("global_var")?;
            scope.assign("global_var", "I have been modified");
            out.say(format!("  modified the global inside a function: {}", scope.lookup("global_var")?));
            Ok(Value::None)
        })?
    };
    modify_global.call(CallArgs::new())?;
    out.flush_to(c)?;
    c.print(format!("  final value of the global: {}", module.get("global_var")?))?;

    c.js(r#"let globalVar = "I am a global variable";
function modifyGlobal() {
  globalVar = "I have been modified"; // no declaration needed
}"#)?;
    c.blank()
}

fn closures(c: &mut Console) -> Result<()> {
    header(c, "11. Nested functions and closures (like JS closures)")?;

    let make_multiplier = PyFunction::new(Signature::new("make_multiplier").required("n"), |args| {
        let n = args.get("n")?.clone();
        let multiplier = PyFunction::new(Signature::new("multiplier").required("x"), move |inner| {
            py_mul(inner.get("x")?, &n)
        })?;
        Ok(multiplier.into_value())
    })?
    .with_doc("Build a function that multiplies by n");

    let times_three = make_multiplier.call1(3)?;
    c.print(format!("  times_three(5) = {}", call_value(&times_three, CallArgs::new().arg(5))?))?;

    let times_ten = make_multiplier.call1(10)?;
    c.print(format!("  times_ten(7) = {}", call_value(&times_ten, CallArgs::new().arg(7))?))?;

    // each closure keeps its own n
    c.print(format!("  times_three(4) = {}", call_value(&times_three, CallArgs::new().arg(4))?))?;

    c.js("function makeMultiplier(n) {
  return (x) => x * n;
}")?;
    c.blank()
}

fn type_hints(c: &mut Console) -> Result<()> {
    header(c, "12. Type hints (like TypeScript type annotations)")?;

    let add_typed = PyFunction::new(
        Signature::new("add_typed")
            .typed("a", Type::Int)
            .typed("b", Type::Int)
            .returns(Type::Int),
        |args| py_add(args.get("a")?, args.get("b")?),
    )?;
    let greet_typed = PyFunction::new(
        Signature::new("greet_typed")
            .typed("name", Type::Str)
            .typed_default("age", Type::Int, 18)
            .returns(Type::Str),
        |args| Ok(Value::str(format!("{} is {} years old", args.get("name")?, args.get("age")?))),
    )?;

    c.print(format!("  add_typed(5, 3) = {}", add_typed.call2(5, 3)?))?;
    c.print(format!("  greet_typed: {}", greet_typed.call2("Xiao Li", 25)?))?;
    // hints are metadata only; nothing checks them at runtime
    c.print(format!("  signature: {}", greet_typed.signature()))?;

    c.js("function addTyped(a: number, b: number): number {
  return a + b;
}")?;
    c.blank()
}

const AREA_DOC: &str = "
    Compute the area of a rectangle

    Args:
        length (float): length of the rectangle
        width (float): width of the rectangle

    Returns:
        float: area of the rectangle
    ";

fn docstrings(c: &mut Console) -> Result<()> {
    header(c, "13. Docstrings (a function's documentation)")?;

    let calculate_area = PyFunction::new(
        Signature::new("calculate_area")
            .typed("length", Type::Float)
            .typed("width", Type::Float)
            .returns(Type::Float),
        |args| py_mul(args.get("length")?, args.get("width")?),
    )?
    .with_doc(AREA_DOC);

    c.print(format!("  docstring: {}", calculate_area.doc()))?;
    c.print(format!("  result: {}", calculate_area.call2(5, 3)?))?;

    c.js("/**
 * Compute the area of a rectangle
 * @param {number} length
 * @param {number} width
 */")?;
    c.blank()
}

fn higher_order(c: &mut Console) -> Result<()> {
    header(c, "14. Higher-order functions (functions as arguments, like JS callbacks)")?;

    let apply_operation = PyFunction::new(
        Signature::new("apply_operation").required("x").required("y").required("operation"),
        |args| {
            let call = CallArgs::new().arg(args.get("x")?.clone()).arg(args.get("y")?.clone());
            call_value(args.get("operation")?, call)
        },
    )?;
    let add_op = PyFunction::new(Signature::new("add_op").required("a").required("b"), |args| {
        py_add(args.get("a")?, args.get("b")?)
    })?
    .into_value();
    let multiply_op = PyFunction::new(Signature::new("multiply_op").required("a").required("b"), |args| {
        py_mul(args.get("a")?, args.get("b")?)
    })?
    .into_value();
    let power = PyFunction::lambda(&["x", "y"], |args| py_pow(args.get("x")?, args.get("y")?))?.into_value();

    let apply = |op: Value| apply_operation.call(CallArgs::new().arg(5).arg(3).arg(op));
    c.print(format!("  apply_operation(5, 3, add_op) = {}", apply(add_op)?))?;
    c.print(format!("  apply_operation(5, 3, multiply_op) = {}", apply(multiply_op)?))?;
    c.print(format!("  apply_operation(5, 3, lambda x, y: x ** y) = {}", apply(power)?))?;

    c.js("function applyOperation(x, y, operation) {
  return operation(x, y);
}")?;
    c.blank()
}

fn factorial(n: &Value) -> Result<Value> {
    if compare(CmpOp::Le, n, &Value::Int(1))? {
        return Ok(Value::Int(1));
    }
    py_mul(n, &factorial(&py_sub(n, &Value::Int(1))?)?)
}

fn recursion(c: &mut Console) -> Result<()> {
    header(c, "15. Recursion (factorial)")?;

    let factorial_fn = PyFunction::new(Signature::new("factorial").required("n"), |args| factorial(args.get("n")?))?;
    c.print(format!("  factorial(5) = {}", factorial_fn.call1(5)?))?;
    c.print(format!("  factorial(10) = {}", factorial_fn.call1(10)?))?;

    c.js("function factorial(n) {
  if (n <= 1) return 1;
  return n * factorial(n - 1);
}")?;
    c.blank()
}

fn student(name: &str, score: i64, age: i64) -> Value {
    Value::dict(vec![
        ("name", Value::str(name)),
        ("score", Value::Int(score)),
        ("age", Value::Int(age)),
    ])
}

fn practical(c: &mut Console) -> Result<()> {
    header(c, "16. Practical example")?;

    let process_students = PyFunction::new(
        Signature::new("process_students")
            .required("students")
            .default("filter_func", Value::None)
            .default("sort_func", Value::None),
        |args| {
            let mut students = args.get("students")?.clone();
            let filter_func = args.get("filter_func")?;
            if filter_func.is_truthy() {
                students = Value::list(py_filter(filter_func, students.items()?)?);
            }
            let sort_func = args.get("sort_func")?;
            if sort_func.is_truthy() {
                sort_list(&students, |s| call_value(sort_func, CallArgs::positional([s.clone()])))?;
            }
            Ok(students)
        },
    )?
    .with_doc("Filter, then sort, a list of student records");

    let students = Value::list(vec![
        student("Zhang San", 85, 20),
        student("Li Si", 92, 19),
        student("Wang Wu", 78, 21),
    ]);
    let score = Value::str("score");

    let high_score = {
        let score = score.clone();
        PyFunction::lambda(&["s"], move |args| {
            let value = args.get("s")?.get_item(&score)?;
            Ok(Value::Bool(compare(CmpOp::Ge, &value, &Value::Int(80))?))
        })?
        .into_value()
    };
    let by_score = {
        let score = score.clone();
        PyFunction::lambda(&["s"], move |args| args.get("s")?.get_item(&score))?.into_value()
    };

    let high_scorers = process_students.call(
        CallArgs::new()
            .arg(students)
            .kw("filter_func", high_score)
            .kw("sort_func", by_score),
    )?;

    c.print("  high scorers (sorted by score):")?;
    let name = Value::str("name");
    for s in high_scorers.items()? {
        c.print(format!("    {}: {} points", s.get_item(&name)?, s.get_item(&score)?))?;
    }

    c.js("const highScorers = students
  .filter(s => s.score >= 80)
  .sort((a, b) => a.score - b.score);")?;
    c.blank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> String {
        let (mut console, buffer) = Console::capture();
        Functions.run(&mut console).unwrap();
        buffer.contents()
    }

    #[test]
    fn test_closure_lines() {
        let text = transcript();
        assert!(text.contains("  times_three(5) = 15\n"));
        assert!(text.contains("  times_ten(7) = 70\n"));
        assert!(text.contains("  times_three(4) = 12\n"));
    }

    #[test]
    fn test_mixed_binding_lines() {
        let text = transcript();
        assert!(text.contains(
            "  name: Xiao Hong\n  age: 25\n  *args: ('hobby1', 'hobby2')\n  **kwargs: {'city': 'Beijing', 'hobby': 'reading'}\n"
        ));
        assert!(text.contains("  type of args: <class 'tuple'>\n  args contents: (1, 2, 3)\n"));
        assert!(text.contains("  type of kwargs: <class 'dict'>\n"));
    }

    #[test]
    fn test_mutable_default_accumulates() {
        let text = transcript();
        assert!(text.contains("  add_item('a') -> ['a']\n  add_item('b') -> ['a', 'b']\n"));
        assert!(text.contains("  add_item_safe('b') -> ['b']\n"));
    }

    #[test]
    fn test_scope_lines() {
        let text = transcript();
        assert!(text.contains("  global after shadowing: I am a global variable\n"));
        assert!(text.contains("  final value of the global: I have been modified\n"));
    }

    #[test]
    fn test_practical_filter_then_sort() {
        let text = transcript();
        assert!(text.contains("  high scorers (sorted by score):\n    Zhang San: 85 points\n    Li Si: 92 points\n"));
        assert!(!text.contains("Wang Wu: 78"));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(&Value::Int(5)).unwrap(), Value::Int(120));
        assert_eq!(factorial(&Value::Int(0)).unwrap(), Value::Int(1));
        assert_eq!(factorial(&Value::Int(10)).unwrap(), Value::Int(3628800));
    }
}

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use typesplit::{
    load_declarations, process_types, Declaration, MatchMode, SplitError, SplitObserver,
    SplitOptions,
};

fn write(p: &Path, content: &str) {
    let mut f = fs::File::create(p).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

fn read(p: &Path) -> String {
    fs::read_to_string(p).unwrap()
}

const EMPLOYEES: &str = r#"
export enum Departments { HR, IT, Finance }
export type Employees = {
  id: number;
  name: string;
  department: Departments;
};
"#;

#[test]
fn splits_enum_and_dependent_type() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    write(
        &input,
        "enum Status { Active, Inactive } type User = { id: number; status: Status };",
    );

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.count, 2);
    assert_eq!(read(&out.join("Status.ts")), "export enum Status { Active, Inactive }");
    assert_eq!(
        read(&out.join("User.ts")),
        "import { Status } from './Status';\nexport type User = { id: number; status: Status };"
    );
    assert_eq!(result.types["Status"], out.join("Status.ts"));
    assert_eq!(result.types["User"], out.join("User.ts"));
}

#[test]
fn unexported_aliases_gain_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    write(&input, "type A = {}; type B = { a: A };");

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.count, 2);
    assert_eq!(read(&out.join("A.ts")), "export type A = {};");
    assert_eq!(
        read(&out.join("B.ts")),
        "import { A } from './A';\nexport type B = { a: A };"
    );
}

#[test]
fn already_exported_declarations_are_kept_verbatim() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("output");
    write(&input, EMPLOYEES);

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.count, 2);
    assert_eq!(
        read(&out.join("Departments.ts")),
        "export enum Departments { HR, IT, Finance }"
    );
    let employees = read(&out.join("Employees.ts"));
    assert!(employees.starts_with("import { Departments } from './Departments';\nexport type Employees = {"));
    assert_eq!(employees.matches("export ").count(), 1);
}

#[test]
fn count_matches_files_written() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("models.ts");
    let out = dir.path().join("models");
    write(
        &input,
        r#"
import { Remote } from "./remote";

/** Lifecycle of an order. */
enum OrderState { Open, Shipped }
interface Address { street: string; city: string }
export interface Customer { address: Address; remote: Remote }
type OrderId = string;
export type Order = { id: OrderId; state: OrderState; customer: Customer };
function helper(): void {}
const limit = 10;
"#,
    );

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    let written = fs::read_dir(&out).unwrap().count();
    assert_eq!(result.count, 5);
    assert_eq!(written, result.count);
    assert_eq!(result.types.len(), result.count);

    let keys: Vec<_> = result.types.keys().map(String::as_str).collect();
    assert_eq!(keys, ["OrderState", "OrderId", "Order", "Address", "Customer"]);

    assert_eq!(
        read(&out.join("Order.ts")),
        "import { OrderId } from './OrderId';\n\
         import { OrderState } from './OrderState';\n\
         import { Customer } from './Customer';\n\
         export type Order = { id: OrderId; state: OrderState; customer: Customer };"
    );
    assert_eq!(
        read(&out.join("Customer.ts")),
        "import { Address } from './Address';\nexport interface Customer { address: Address; remote: Remote }"
    );
}

#[test]
fn recursive_type_has_no_self_import() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tree.ts");
    let out = dir.path().join("out");
    write(&input, "interface TreeNode { value: number; children: TreeNode[] }");

    process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(
        read(&out.join("TreeNode.ts")),
        "export interface TreeNode { value: number; children: TreeNode[] }"
    );
}

#[test]
fn cyclic_references_import_each_other() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cycle.ts");
    let out = dir.path().join("out");
    write(
        &input,
        "interface Parent { kids: Child[] }\ninterface Child { parent: Parent }",
    );

    process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert!(read(&out.join("Parent.ts")).starts_with("import { Child } from './Child';\n"));
    assert!(read(&out.join("Child.ts")).starts_with("import { Parent } from './Parent';\n"));
}

#[test]
fn substring_false_positive_is_kept_by_default() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ids.ts");
    write(
        &input,
        "type Id = string;\ntype Identity = { value: string };\ntype Person = { who: Identity };",
    );

    let substring = dir.path().join("substring");
    process_types(&input, Some(&substring), &SplitOptions::default(), &()).unwrap();
    assert_eq!(
        read(&substring.join("Person.ts")),
        "import { Id } from './Id';\nimport { Identity } from './Identity';\nexport type Person = { who: Identity };"
    );

    let word = dir.path().join("word");
    let options = SplitOptions::default().with_match_mode(MatchMode::Word);
    process_types(&input, Some(&word), &options, &()).unwrap();
    assert_eq!(
        read(&word.join("Person.ts")),
        "import { Identity } from './Identity';\nexport type Person = { who: Identity };"
    );
}

#[test]
fn running_twice_is_byte_identical() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    write(&input, EMPLOYEES);

    let options = SplitOptions::default().with_overwrite(true);
    let first = process_types(&input, Some(&out), &options, &()).unwrap();
    let snapshot: Vec<(PathBuf, String)> = first
        .types
        .values()
        .map(|p| (p.clone(), read(p)))
        .collect();

    let second = process_types(&input, Some(&out), &options, &()).unwrap();

    assert_eq!(first, second);
    for (path, content) in snapshot {
        assert_eq!(read(&path), content);
    }
}

#[test]
fn existing_directory_is_reused() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    write(&out.join("Stale.ts"), "export type Stale = 1;");
    write(&input, "type Fresh = 2;");

    process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(read(&out.join("Fresh.ts")), "export type Fresh = 2;");
    assert_eq!(read(&out.join("Stale.ts")), "export type Stale = 1;");
}

#[test]
fn nested_output_directory_is_created() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("a").join("b").join("c");
    write(&input, "enum E { A }");

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.types["E"], out.join("E.ts"));
    assert!(out.join("E.ts").is_file());
}

#[test]
fn dry_run_touches_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    write(&input, EMPLOYEES);

    let result = process_types(&input, None, &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.count, 2);
    assert!(result.types.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn empty_input_fails_before_creating_directory() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.ts");
    let out = dir.path().join("output");
    write(&input, "");

    let err = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap_err();

    assert!(matches!(err, SplitError::NoDeclarations));
    assert_eq!(err.to_string(), "No types, enums, or interfaces found.");
    assert!(!out.exists());
}

#[test]
fn missing_input_is_a_read_error() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");

    let err = process_types(
        &dir.path().join("missing.ts"),
        Some(&out),
        &SplitOptions::default(),
        &(),
    )
    .unwrap_err();

    assert!(matches!(err, SplitError::InputRead { .. }));
    assert!(err.to_string().contains("missing.ts"));
    assert!(!out.exists());
}

#[test]
fn parse_failure_creates_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.ts");
    let out = dir.path().join("out");
    write(&input, "enum { A");

    let err = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap_err();

    assert!(matches!(err, SplitError::Parse { .. }));
    assert!(!out.exists());
}

#[test]
fn output_path_that_is_a_file_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let blocker = dir.path().join("blocker");
    write(&input, "type A = 1;");
    write(&blocker, "not a directory");

    let err = process_types(&input, Some(&blocker), &SplitOptions::default(), &()).unwrap_err();
    assert!(err.is_output_error());
}

#[test]
fn module_inputs_keep_their_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.mts");
    let out = dir.path().join("out");
    write(&input, "export type Flag = boolean;");

    let result = process_types(&input, Some(&out), &SplitOptions::default(), &()).unwrap();

    assert_eq!(result.types["Flag"], out.join("Flag.mts"));
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl SplitObserver for Recorder {
    fn parse_diagnostic(&self, _path: &Path, message: &str) {
        self.events.borrow_mut().push(format!("diagnostic {message}"));
    }

    fn declarations_found(&self, count: usize) {
        self.events.borrow_mut().push(format!("found {count}"));
    }

    fn directory_ready(&self, _dir: &Path, created: bool) {
        self.events.borrow_mut().push(format!("dir created={created}"));
    }

    fn file_written(&self, decl: &Declaration, _path: &Path, imports: usize) {
        self.events
            .borrow_mut()
            .push(format!("wrote {} ({imports})", decl.name));
    }
}

#[test]
fn observer_sees_pipeline_in_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    write(
        &input,
        "interface Card { suit: Suit }\ntype Hand = Card[];\nenum Suit { Hearts }",
    );

    let recorder = Recorder::default();
    process_types(&input, Some(&out), &SplitOptions::default(), &recorder).unwrap();

    assert_eq!(
        recorder.events.into_inner(),
        [
            "found 3",
            "dir created=true",
            "wrote Suit (0)",
            "wrote Hand (1)",
            "wrote Card (1)",
        ]
    );
}

#[test]
fn recoverable_syntax_errors_are_reported_and_split_continues() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    let out = dir.path().join("out");
    write(&input, "type A = 1;\nconst a;");

    let recorder = Recorder::default();
    let result = process_types(&input, Some(&out), &SplitOptions::default(), &recorder).unwrap();

    assert_eq!(result.count, 1);
    assert_eq!(read(&out.join("A.ts")), "export type A = 1;");

    let events = recorder.events.into_inner();
    assert!(events[0].starts_with("diagnostic "), "events: {events:?}");
    assert_eq!(&events[1..], ["found 1", "dir created=true", "wrote A (0)"]);
}

#[test]
fn load_declarations_reports_without_writing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.ts");
    write(&input, "type A = 1;\nreturn 1;");

    let recorder = Recorder::default();
    let decls = load_declarations(&input, &recorder).unwrap();

    assert_eq!(decls.len(), 1);
    assert_eq!(decls.aliases[0].name, "A");
    let events = recorder.events.into_inner();
    assert_eq!(events.len(), 2);
    assert!(events[0].starts_with("diagnostic "));
    assert_eq!(events[1], "found 1");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

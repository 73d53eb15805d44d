/* Rust Code Generation Tests
 *
 * These tests drive the generator from inline YAML schemas and check the
 * printed accessor unit: ordering, per-type shape and union dispatch.
 * The conformance crate compiles and runs the same templates against real buffers.
 */

use lazy_gen::codegen::rust_gen::{emit_abstract, emit_concrete};
use lazy_gen::codegen::{EmittedKind, RustCodeGenerator, GENERATED_HEADER};
use lazy_gen::{generate, GeneratorOptions};
use lazy_types::Schema;

const POINT_YAML: &str = r#"
types:
  point:
    name: Point
    fields:
      x: { class: primitive, type: i32 }
      y: { class: primitive, type: i32 }
serialization:
  point:
    size: 8
    fields: [[x, 0], [y, 4]]
"#;

const SHAPES_YAML: &str = r#"
types:
  circle:
    name: Circle
    parent: shape
    fields:
      r: { class: primitive, type: i32 }
  shape:
    name: Shape
    fields: {}
  square:
    name: Square
    parent: shape
    fields:
      s: { class: primitive, type: i32 }
  triangle:
    name: Triangle
    parent: shape
    fields:
      a: { class: primitive, type: i32 }
  scene:
    name: Scene
    fields:
      title: { class: primitive, type: string }
      main: { class: type, id: shape }
      count: { class: primitive, type: u32 }
serialization:
  circle:
    size: 4
    fields: [[r, 0]]
  shape:
    discriminants:
      0: circle
      1: square
      2: triangle
  square:
    size: 4
    fields: [[s, 0]]
  triangle:
    size: 4
    fields: [[a, 0]]
  scene:
    size: 12
    fields: [[title, 0], [main, 4], [count, 8]]
"#;

fn parse(yaml: &str) -> Schema {
    serde_yml::from_str(yaml).expect("parse schema YAML")
}

fn generate_default(yaml: &str) -> String {
    generate(&parse(yaml), &GeneratorOptions::default()).expect("generate")
}

#[test]
fn test_generation_is_deterministic() {
    let first = generate_default(SHAPES_YAML);
    let second = generate_default(SHAPES_YAML);
    assert_eq!(first, second);
    assert!(first.starts_with(GENERATED_HEADER));
}

#[test]
fn test_union_members_only_inside_parent_module() {
    let code = generate_default(SHAPES_YAML);
    for member in ["Circle", "Square", "Triangle"] {
        let definition = format!("pub struct {}<'a> {{", member);
        assert_eq!(code.matches(&definition).count(), 1, "{} defined once", member);
        /* Defined inside the module: indented one level */
        assert!(code.contains(&format!("    {}", definition)));
        assert!(!code.contains(&format!("\n{}", definition)));
    }
}

#[test]
fn test_definitions_follow_declaration_order() {
    let code = generate_default(SHAPES_YAML);
    let shape = code.find("pub mod shape {").expect("shape module");
    let scene = code.find("pub struct Scene<'a> {").expect("scene struct");
    let registry = code.find("pub enum Object<'a> {").expect("registry");
    assert!(shape < scene);
    assert!(scene < registry);
}

#[test]
fn test_scenario_a_point() {
    let schema = parse(POINT_YAML);
    let emitted = emit_concrete(&schema, "point", &GeneratorOptions::default()).expect("emit point");
    assert_eq!(emitted.kind, EmittedKind::Concrete { getters: vec!["x".to_string(), "y".to_string()] });

    let code = generate(&schema, &GeneratorOptions::default()).expect("generate");
    assert!(code.contains("    pub fn read(view: View<'a>, address: usize) -> Result<Self, DecodeError> {"));
    assert!(code.contains("    pub fn x(&self) -> Result<i32, DecodeError> {\n        self.view.read_i32(0)\n    }"));
    assert!(code.contains("    pub fn y(&self) -> Result<i32, DecodeError> {\n        self.view.read_i32(4)\n    }"));
    /* Both fields are fixed primitives: the no-op default visitor applies */
    assert!(!code.contains("fn visit_children<V: ObjectVisitor<Object<'a>>>(&self, visitor: &mut V) -> Result<bool, DecodeError> {\n        let mut found"));
}

#[test]
fn test_shape_fidelity_keeps_layout_order() {
    let yaml = r#"
types:
  rec:
    name: Rec
    fields:
      a: { class: primitive, type: u64 }
      b: { class: primitive, type: bool }
      c: { class: primitive, type: char }
serialization:
  rec:
    size: 13
    fields: [[c, 9], [a, 0], [b, 8]]
"#;
    let emitted = emit_concrete(&parse(yaml), "rec", &GeneratorOptions::default()).expect("emit rec");
    let EmittedKind::Concrete { getters } = emitted.kind else {
        panic!("expected a concrete type");
    };
    assert_eq!(getters, vec!["c", "a", "b"]);
    let c = emitted.source.find("pub fn c(").expect("c");
    let a = emitted.source.find("pub fn a(").expect("a");
    let b = emitted.source.find("pub fn b(").expect("b");
    assert!(c < a && a < b);
    assert!(emitted.source.contains("self.view.read_char(9)"));
    assert!(emitted.source.contains("self.view.read_u64(0)"));
    assert!(emitted.source.contains("self.view.read_bool(8)"));
}

#[test]
fn test_scenario_b_and_discriminant_exhaustiveness() {
    let schema = parse(SHAPES_YAML);
    let emitted = emit_abstract(&schema, "shape", &GeneratorOptions::default()).expect("emit shape");
    let EmittedKind::Abstract { variants, .. } = &emitted.kind else {
        panic!("expected an abstract type");
    };
    let tags: Vec<(&str, u32)> = variants.iter().map(|v| (v.name.as_str(), v.tag)).collect();
    assert_eq!(tags, vec![("Circle", 0), ("Square", 1), ("Triangle", 2)]);

    let source = &emitted.source;
    let tag_enum = source.split("pub enum Type {\n").nth(1).expect("tag enum");
    let tag_enum = &tag_enum[..tag_enum.find('}').expect("end of tag enum")];
    assert_eq!(tag_enum.lines().filter(|line| line.contains(" = ")).count(), 3);
    assert!(source.contains("            2 => Ok(Shape::Triangle(Triangle::read(body, DISCRIMINANT_SIZE)?)),"));
    assert!(source.contains("tag => Err(DecodeError::UnknownDiscriminant { type_name: \"Shape\", tag }),"));
    assert!(source.contains("body.read_u32(DISCRIMINANT_OFFSET)?"));
    assert!(source.contains(
        "matches!(object, Object::Shape(_) | Object::ShapeCircle(_) | Object::ShapeSquare(_) | Object::ShapeTriangle(_))"
    ));
    assert!(source.contains("    impl<'a> ::core::ops::Deref for Circle<'a> {"));
}

#[test]
fn test_visitor_composition_only_nested_fields() {
    let code = generate_default(SHAPES_YAML);
    let scene = code.split("impl<'a> LazyObject<'a, Object<'a>> for Scene<'a> {").nth(1).expect("scene impl");
    let scene = &scene[..scene.find("\n}\n").expect("end of impl")];
    let visits: Vec<&str> = scene.lines().filter(|line| line.contains("visit_value")).collect();
    assert_eq!(visits, vec!["        found |= VisitValue::<Object<'a>>::visit_value(&self.main()?, visitor)?;"]);
    assert!(scene.contains("let mut found = false;"));
    assert!(scene.contains("Ok(found)"));
}

#[test]
fn test_variant_visitor_starts_from_base() {
    let yaml = r#"
types:
  leaf:
    name: Leaf
    fields: {}
  node:
    name: Node
    fields:
      tag: { class: type, id: leaf }
  unary:
    name: Unary
    parent: node
    fields:
      operand: { class: type, id: node }
      arity: { class: primitive, type: u32 }
serialization:
  leaf:
    size: 0
    fields: []
  node:
    discriminants:
      7: unary
    fields: [[tag, 0]]
  unary:
    size: 8
    fields: [[operand, 0], [arity, 4]]
"#;
    let code = generate_default(yaml);
    assert!(code.contains(
        "let mut found = self.base.visit_children(visitor)?;\n            found |= VisitValue::<Object<'a>>::visit_value(&self.operand()?, visitor)?;\n            Ok(found)"
    ));
    /* `tag` would shadow the sum type's accessor */
    assert!(code.contains("pub fn tag_(&self) -> Result<Leaf<'a>, DecodeError> {"));
    assert!(code.contains("7 => Ok(Node::Unary(Unary::read(body, DISCRIMINANT_SIZE)?)),"));
}

#[test]
fn test_container_getters_decode_through_runtime() {
    let yaml = r#"
types:
  bag:
    name: Bag
    fields:
      items: { class: sequence, type: { class: type, id: bag } }
      label: { class: option, type: { class: primitive, type: string } }
      outcome: { class: result, type0: { class: primitive, type: u64 }, type1: { class: type, id: bag } }
serialization:
  bag:
    size: 12
    fields: [[items, 0], [label, 4], [outcome, 8]]
"#;
    let code = generate_default(yaml);
    assert!(code.contains("pub fn items(&self) -> Result<Sequence<'a, Bag<'a>>, DecodeError> {\n        self.view.decode(0)"));
    assert!(code.contains("pub fn label(&self) -> Result<Option<&'a str>, DecodeError> {\n        self.view.decode(4)"));
    assert!(code.contains("pub fn outcome(&self) -> Result<Result<u64, Bag<'a>>, DecodeError> {\n        self.view.decode(8)"));
    assert!(code.contains("visit_value(&self.items()?, visitor)?;"));
    assert!(!code.contains("visit_value(&self.label()?, visitor)?;"));
    assert!(code.contains("visit_value(&self.outcome()?, visitor)?;"));
}

#[test]
fn test_registry_lists_every_type() {
    let code = generate_default(SHAPES_YAML);
    assert!(code.contains(
        "pub enum Object<'a> {\n    ShapeCircle(shape::Circle<'a>),\n    Shape(Shape<'a>),\n    ShapeSquare(shape::Square<'a>),\n    ShapeTriangle(shape::Triangle<'a>),\n    Scene(Scene<'a>),\n}"
    ));
    assert!(code.contains("Object::ShapeTriangle(value) => value.visit_children(visitor),"));
}

#[test]
fn test_printer_without_registry() {
    let schema = parse(SHAPES_YAML);
    let options = GeneratorOptions { runtime_crate: "rt".to_string(), emit_registry: false };
    let code = RustCodeGenerator::new(&schema, options).emit_code().expect("emit");
    assert!(code.contains("use rt::{"));
    assert!(!code.contains("enum Object"));
    assert!(!code.contains("Object::"));
    assert!(!code.contains("LazyObject<'a"));
    assert!(code.contains("impl<'a> Decode<'a> for Shape<'a> {"));
}

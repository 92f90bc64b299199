//! Tests for the visitor walk and the built-in strategies

use rstest::{fixture, rstest};

use xmlmodel::domain::{
    walk, AttributeCollector, AttributePrinter, Document, ElementId, ElementTree, NamePrinter,
    RemoveEntity, RenameEntity, VisitResult, Visitor,
};
use xmlmodel::util::testing;

#[fixture]
fn plan() -> Document {
    testing::init_test_setup();
    let mut document = Document::new("plano").unwrap();
    let root = document.root();
    let tree = document.tree_mut();
    let curso = tree.append_child(root, "curso").unwrap();
    tree.get_mut(curso).unwrap().add_attribute("value", "MEI");
    tree.append_child(curso, "curso2").unwrap();
    tree.append_child(curso, "curso3").unwrap();
    let fuc = tree.append_child(root, "fuc").unwrap();
    tree.get_mut(fuc)
        .unwrap()
        .add_attributes([("codigo", "M4310"), ("ects", "6")]);
    document
}

fn names_in_visit_order(document: &mut Document) -> Vec<String> {
    let mut seen = Vec::new();
    let mut record = |tree: &mut ElementTree, id: ElementId| {
        seen.push(tree.get(id).unwrap().name().to_string());
        VisitResult::Continue
    };
    document.accept(&mut record);
    seen
}

#[rstest]
fn given_plan_when_walking_then_preorder(mut plan: Document) {
    assert_eq!(
        names_in_visit_order(&mut plan),
        vec!["plano", "curso", "curso2", "curso3", "fuc"]
    );
}

#[rstest]
fn given_skip_children_when_walking_then_subtree_not_visited(mut plan: Document) {
    let root = plan.root();
    let mut seen = Vec::new();
    let mut visitor = |tree: &mut ElementTree, id: ElementId| {
        let name = tree.get(id).unwrap().name().to_string();
        let result = if name == "curso" {
            VisitResult::SkipChildren
        } else {
            VisitResult::Continue
        };
        seen.push(name);
        result
    };

    let visited = walk(plan.tree_mut(), root, &mut visitor);

    assert_eq!(visited, 3);
    assert_eq!(seen, vec!["plano", "curso", "fuc"]);
}

#[rstest]
fn given_stop_when_walking_then_nothing_after(mut plan: Document) {
    let root = plan.root();
    let mut count = 0;
    let mut visitor = |_: &mut ElementTree, _: ElementId| {
        count += 1;
        if count == 2 {
            VisitResult::Stop
        } else {
            VisitResult::Continue
        }
    };

    let visited = walk(plan.tree_mut(), root, &mut visitor);

    assert_eq!(visited, 2);
}

#[rstest]
fn given_visitor_that_appends_children_when_walking_then_new_children_visited(
    mut plan: Document,
) {
    let root = plan.root();
    let mut visitor = |tree: &mut ElementTree, id: ElementId| {
        if tree.get(id).unwrap().name() == "fuc" {
            tree.append_child(id, "nome").unwrap();
        }
        VisitResult::Continue
    };

    let visited = walk(plan.tree_mut(), root, &mut visitor);

    assert_eq!(visited, 6);
}

#[rstest]
fn given_plan_when_printing_names_then_one_line_per_element(mut plan: Document) {
    let mut printer = NamePrinter::new(Vec::new());

    plan.accept(&mut printer);

    let out = String::from_utf8(printer.finish().unwrap()).unwrap();
    assert_eq!(out, "plano\ncurso\ncurso2\ncurso3\nfuc\n");
}

#[rstest]
fn given_plan_when_printing_attributes_then_insertion_order(mut plan: Document) {
    let mut printer = AttributePrinter::new(Vec::new());

    plan.accept(&mut printer);

    let out = String::from_utf8(printer.finish().unwrap()).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "Attributes of plano: {}");
    assert_eq!(lines[1], "Attributes of curso: {value=MEI}");
    assert_eq!(lines[4], "Attributes of fuc: {codigo=M4310, ects=6}");
}

struct FailingWriter;

impl std::io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn given_broken_writer_when_printing_then_walk_stops_with_error(mut plan: Document) {
    let root = plan.root();
    let mut printer = NamePrinter::new(FailingWriter);

    let visited = walk(plan.tree_mut(), root, &mut printer);

    assert_eq!(visited, 1);
    assert!(printer.finish().is_err());
}

struct UnflushableWriter(Vec<u8>);

impl std::io::Write for UnflushableWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::other("disk full"))
    }
}

#[rstest]
fn given_failing_flush_when_finishing_printer_then_error_surfaces(mut plan: Document) {
    let mut names = NamePrinter::new(UnflushableWriter(Vec::new()));
    let mut attributes = AttributePrinter::new(UnflushableWriter(Vec::new()));

    assert_eq!(plan.accept(&mut names), 5);
    assert_eq!(plan.accept(&mut attributes), 5);

    assert!(names.finish().is_err());
    assert!(attributes.finish().is_err());
}

#[rstest]
fn given_buffered_sink_when_finishing_printer_then_output_flushed(mut plan: Document) {
    let mut printer = NamePrinter::new(std::io::BufWriter::new(Vec::new()));

    plan.accept(&mut printer);

    let sink = printer.finish().unwrap();
    assert_eq!(sink.buffer().len(), 0);
    assert_eq!(sink.get_ref().as_slice(), b"plano\ncurso\ncurso2\ncurso3\nfuc\n");
}

#[rstest]
fn given_plan_when_collecting_then_snapshot_per_element(mut plan: Document) {
    let mut collector = AttributeCollector::new();

    plan.accept(&mut collector);

    assert_eq!(collector.entries.len(), 5);
    let (name, attributes) = &collector.entries[4];
    assert_eq!(name, "fuc");
    assert_eq!(attributes.get("codigo").map(String::as_str), Some("M4310"));
}

#[rstest]
fn given_rename_visitor_when_accepted_then_counts_renames(mut plan: Document) {
    let mut rename = RenameEntity::new("curso2", "disciplina");

    plan.accept(&mut rename);

    assert_eq!(rename.renamed, 1);
    assert_eq!(plan.find("disciplina").len(), 1);
}

#[rstest]
fn given_remove_visitor_when_accepted_then_removed_subtree_not_visited(mut plan: Document) {
    let mut remove = RemoveEntity::new("curso");

    plan.accept(&mut remove);

    assert_eq!(remove.removed, 1);
    assert_eq!(names_in_visit_order(&mut plan), vec!["plano", "fuc"]);
}

#[rstest]
fn given_boxed_visitor_when_accepted_then_dispatches_dynamically(mut plan: Document) {
    let mut visitor: Box<dyn Visitor> = Box::new(RenameEntity::new("fuc", "unidade"));

    plan.accept(&mut *visitor);

    assert_eq!(plan.find("unidade").len(), 1);
}

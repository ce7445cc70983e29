use super::types::{
    CreateIndex, CreateTable, DropTable, Insert, Mutation, NodeKind, ProcedureCall, RenameTable,
    Select, SyntaxTree
};

/// Per-node-kind callbacks for a tree walk.
///
/// Every method defaults to a no-op, so an advisor implements only the node
/// kinds its rule reacts to. The dispatch itself lives in
/// [`SyntaxTree::walk`], which matches node kinds exhaustively.
pub trait NodeVisitor {
    fn visit_create_table(&mut self, _line: usize, _node: &CreateTable) {}

    fn visit_create_index(&mut self, _line: usize, _node: &CreateIndex) {}

    fn visit_drop_table(&mut self, _line: usize, _node: &DropTable) {}

    fn visit_rename_table(&mut self, _line: usize, _node: &RenameTable) {}

    fn visit_procedure_call(&mut self, _line: usize, _node: &ProcedureCall) {}

    fn visit_select(&mut self, _line: usize, _node: &Select) {}

    fn visit_insert(&mut self, _line: usize, _node: &Insert) {}

    fn visit_update(&mut self, _line: usize, _node: &Mutation) {}

    fn visit_delete(&mut self, _line: usize, _node: &Mutation) {}
}

impl SyntaxTree {
    /// Visit every node in source order
    pub fn walk<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) {
        for node in &self.nodes {
            let line = node.line;
            match &node.kind {
                NodeKind::CreateTable(n) => visitor.visit_create_table(line, n),
                NodeKind::CreateIndex(n) => visitor.visit_create_index(line, n),
                NodeKind::DropTable(n) => visitor.visit_drop_table(line, n),
                NodeKind::RenameTable(n) => visitor.visit_rename_table(line, n),
                NodeKind::ProcedureCall(n) => visitor.visit_procedure_call(line, n),
                NodeKind::Select(n) => visitor.visit_select(line, n),
                NodeKind::Insert(n) => visitor.visit_insert(line, n),
                NodeKind::Update(n) => visitor.visit_update(line, n),
                NodeKind::Delete(n) => visitor.visit_delete(line, n),
                NodeKind::Other => {}
            }
        }
    }
}

/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the declaration, statement and expression enums
/// - expressions: Definitions for the compound expression nodes
/// - statements: Definitions for the declaration and statement nodes
pub mod ast;
pub mod expressions;
pub mod statements;

//! Program fixtures built through the public construction API

use escape_classifier::{
    ConcreteTypeId, Discriminator, Function, FunctionBuilder, InterfaceId, Program, ReturnKind,
    TypeCatalog,
};

/// A catalog with the program built against it
pub struct Fixture {
    pub catalog: TypeCatalog,
    pub program: Program,
}

/// `returnResult() result { return result{count: 10} }`
pub fn return_value_stack() -> Fixture {
    let mut catalog = TypeCatalog::new();
    let result = catalog.register_type("result").unwrap().id();

    let mut f = FunctionBuilder::new(&catalog, "returnResult", ReturnKind::Value(result)).unwrap();
    let s0 = f.construct_value("s0", result).unwrap();
    f.return_value(&s0).unwrap();
    let function = f.build().unwrap();

    let mut program = Program::builder();
    program.add(function).unwrap();
    Fixture {
        program: program.build(),
        catalog,
    }
}

/// `New() io.Reader { return &reader{} }` plus an observing caller
pub fn ptr_iface_inline() -> Fixture {
    let mut catalog = TypeCatalog::new();
    let reader = catalog.register_type("reader").unwrap().id();
    let buffer = catalog.register_type("buffer").unwrap().id();
    let io_reader = catalog.register_interface("io.Reader", &[reader]).unwrap().id();
    catalog.assert_conforms(reader, io_reader).unwrap();

    let new = interface_function(&catalog, "New", io_reader, reader, "s0");

    // read(): r := New(); r.Read(b); return b
    let mut read = FunctionBuilder::new(&catalog, "read", ReturnKind::Value(buffer)).unwrap();
    let b = read.construct_value("b", buffer).unwrap();
    read.call("New", true).unwrap();
    read.return_value(&b).unwrap();
    let read = read.build().unwrap();

    let mut program = Program::builder();
    program.add(new).unwrap();
    program.add(read).unwrap();
    Fixture {
        program: program.build(),
        catalog,
    }
}

/// `New(vers) io.Reader` choosing between `readerV1` and `readerV2`
pub fn ptr_iface_multi_impl(discriminator: Discriminator) -> Fixture {
    let mut catalog = TypeCatalog::new();
    let v1 = catalog.register_type("readerV1").unwrap().id();
    let v2 = catalog.register_type("readerV2").unwrap().id();
    let io_reader = catalog.register_interface("io.Reader", &[v1, v2]).unwrap().id();

    let mut f = FunctionBuilder::new(&catalog, "New", ReturnKind::Interface(io_reader)).unwrap();
    f.dispatch(discriminator, |d| {
        d.value_branch("v1", |b| {
            let s = b.construct_pointer("s0", v1)?;
            b.return_via_interface(&s, io_reader)
        })?;
        d.default_branch(|b| {
            let s = b.construct_pointer("s1", v2)?;
            b.return_via_interface(&s, io_reader)
        })
    })
    .unwrap();
    let function = f.build().unwrap();

    let mut program = Program::builder();
    program.add(function).unwrap();
    Fixture {
        program: program.build(),
        catalog,
    }
}

/// `arity` implementors of one interface; a single function returns implementor `returned`
pub fn interface_of_arity(arity: usize, returned: usize) -> Fixture {
    let mut catalog = TypeCatalog::new();
    let types: Vec<ConcreteTypeId> = (0..arity)
        .map(|i| catalog.register_type(format!("impl{i}")).unwrap().id())
        .collect();
    let iface = catalog.register_interface("I", &types).unwrap().id();

    let function = interface_function(&catalog, "New", iface, types[returned % arity], "s0");
    Fixture {
        program: Program::from_functions(vec![function]),
        catalog,
    }
}

pub fn interface_function(
    catalog: &TypeCatalog,
    name: &str,
    iface: InterfaceId,
    ty: ConcreteTypeId,
    site: &str,
) -> Function {
    let mut f = FunctionBuilder::new(catalog, name, ReturnKind::Interface(iface)).unwrap();
    let s = f.construct_pointer(site, ty).unwrap();
    f.return_via_interface(&s, iface).unwrap();
    f.build().unwrap()
}

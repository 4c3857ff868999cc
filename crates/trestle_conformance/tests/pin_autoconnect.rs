//! Pin/pad wiring through the full pipeline: tristate insertion and the
//! generated `autoconnect_pads` entry point.

use std::collections::HashMap;

use trestle_bridge::{bridge, BridgeConfig};
use trestle_conformance::TableLowering;
use trestle_ir::{
    DesignContext, Direction, Layout, LayoutField, MemberKind, Module, PadDir, PinRecord,
};

/// Builds the reference pin scenario: pads `{data: io-8bit, clk: i-1bit}`.
fn pads_module(ctx: &mut DesignContext) -> Module {
    let layout = Layout::new(
        ctx.interner(),
        vec![
            LayoutField::leaf(ctx.intern("data"), 8),
            LayoutField::leaf(ctx.intern("clk"), 1),
        ],
    )
    .unwrap();
    let pads = ctx.register_pads("pads", layout);
    let mut dirs = HashMap::new();
    dirs.insert(ctx.intern("data"), PadDir::InOut);
    dirs.insert(ctx.intern("clk"), PadDir::In);
    let pins = PinRecord::from_pads(ctx, pads, &dirs);

    let mut module = Module::new(ctx.intern("Phy"));
    let name = ctx.intern("pads");
    module
        .add(ctx.interner(), name, MemberKind::Pins(pins))
        .unwrap();
    module
}

/// Assigns the natural directions to the pin sub-signals: `i` inputs,
/// `o`/`oe` outputs.
fn pads_lowering(ctx: &DesignContext, module: &Module) -> TableLowering {
    let mut lowering = TableLowering::new(Direction::Out);
    for path in ["pads.data.i", "pads.clk.i"] {
        let sig = module.signal_at(ctx.interner(), path).unwrap();
        lowering = lowering.direct(sig.duid, Direction::In);
    }
    lowering
}

#[test]
fn io_pad_produces_one_tristate_and_three_connections() {
    let mut ctx = DesignContext::new();
    let module = pads_module(&mut ctx);
    let lowering = pads_lowering(&ctx, &module);

    let wrapper = bridge(&module, &lowering, ctx.interner(), &BridgeConfig::default()).unwrap();
    let wiring = &wrapper.doc.wiring;

    assert_eq!(wiring.tristates.len(), 1);
    assert_eq!(wiring.tristates[0].name, "t_data");
    assert_eq!(wiring.tristates[0].pad, "pads.data");

    // Three tristate connections for `data` plus one plain connection for `clk`.
    assert_eq!(wiring.connects.len(), 4);
    let through_buffer = wiring
        .connects
        .iter()
        .filter(|c| c.dest.starts_with("t_data") || c.src.starts_with("t_data"))
        .count();
    assert_eq!(through_buffer, 3);

    // The tristate field never wires straight to its pad.
    assert!(!wiring
        .connects
        .iter()
        .any(|c| c.dest == "pads.data" || c.src == "pads.data"));
}

#[test]
fn generated_entry_point_applies_wiring() {
    let mut ctx = DesignContext::new();
    let module = pads_module(&mut ctx);
    let lowering = pads_lowering(&ctx, &module);

    let wrapper = bridge(&module, &lowering, ctx.interner(), &BridgeConfig::default()).unwrap();
    let source = &wrapper.source;

    assert!(source.contains(
        "self.pads = Record([(\"data\", [(\"i\", 8), (\"o\", 8), (\"oe\", 1)]), (\"clk\", [(\"i\", 1)])])"
    ));
    assert!(source.contains("def autoconnect_pads(self, pads):"));
    assert!(source.contains("t_data = TSTriple(len(pads.data))"));
    assert!(source.contains("self.specials += t_data.get_tristate(pads.data)"));
    assert!(source.contains("self.pads.data.i.eq(t_data.i),"));
    assert!(source.contains("t_data.o.eq(self.pads.data.o),"));
    assert!(source.contains("t_data.oe.eq(self.pads.data.oe),"));
    assert!(source.contains("self.pads.clk.i.eq(pads.clk),"));
}

#[test]
fn autoconnect_can_be_disabled() {
    let mut ctx = DesignContext::new();
    let module = pads_module(&mut ctx);
    let lowering = pads_lowering(&ctx, &module);
    let config = BridgeConfig {
        autoconnect_pads: false,
        ..BridgeConfig::default()
    };

    let wrapper = bridge(&module, &lowering, ctx.interner(), &config).unwrap();
    assert!(wrapper.doc.wiring.connects.is_empty());
    assert!(wrapper.doc.wiring.tristates.is_empty());
    // The pin member is still declared; only the wiring entry point is gone.
    assert!(wrapper.source.contains("self.pads = Record("));
    assert!(!wrapper.source.contains("autoconnect_pads"));
}

#[test]
fn pin_parameters_bind_to_dotted_paths() {
    let mut ctx = DesignContext::new();
    let module = pads_module(&mut ctx);
    let lowering = pads_lowering(&ctx, &module);

    let wrapper = bridge(&module, &lowering, ctx.interner(), &BridgeConfig::default()).unwrap();
    assert!(wrapper
        .source
        .contains("i_pads__data__i = self.pads.data.i"));
    assert!(wrapper
        .source
        .contains("o_pads__data__o = self.pads.data.o"));
    assert!(wrapper
        .source
        .contains("o_pads__data__oe = self.pads.data.oe"));
    assert!(wrapper
        .source
        .contains("i_pads__clk__i = self.pads.clk.i"));
}

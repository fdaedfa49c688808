//! State to handler table

use super::{Hmi, HmiError};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

/// Input handler of one menu state
pub(super) type Handler<D, C> = fn(&mut Hmi<D, C>, InputSymbol) -> Result<(), HmiError>;

/// Look up the handler for `state`
pub(super) fn handler_for<D: DisplaySurface, C: PrinterController>(
    state: MenuState,
) -> Handler<D, C> {
    use MenuState::*;

    match state {
        MainMenu => Hmi::main_menu,
        SelectFile => Hmi::select_file,
        Prepare => Hmi::prepare,
        Control => Hmi::control,
        Misc => Hmi::misc,
        PrintProcess => Hmi::print_process,
        AxisMove => Hmi::axis_move,
        Temperature => Hmi::temperature,
        Motion => Hmi::motion,
        Info => Hmi::info,
        Tune => Hmi::tune,
        PlaPreheat => Hmi::pla_preheat,
        TpuPreheat => Hmi::tpu_preheat,
        MaxSpeed | MaxSpeedValue | MaxAcceleration | MaxAccelerationValue | MaxJerk
        | MaxJerkValue | Step | StepValue => Hmi::motion_editor,
        FeatureNotAvailable => Hmi::feature_not_available,
        Homing => Hmi::homing,
        MoveX | MoveY | MoveZ | Extruder | HotendTemp | ZOffset | BedTemp | FanSpeed
        | PrintSpeed => Hmi::value_edit,
        PrintWindow => Hmi::print_window,
        PopupWindow => Hmi::cold_extrusion_popup,
        ManualProbeProcess => Hmi::manual_probe,
        MessagePopup => Hmi::message_popup,
        IconFinder => Hmi::icon_finder,
    }
}

/// Generate accessor functions for fields of [`crate::global_state::Globals`].
///
/// Usage:
/// `global_signals! {
///     pub panel_state => panel_state: PanelState,
///     logs => logs: Vec<String>,
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}

/// Macro pour déclarer le catalogue des classes WS-Management
///
/// Chaque entrée déclare une constante portant le nom de la classe et
/// l'ajoute à la fonction `catalog()` générée.
///
/// # Syntaxe
///
/// ```ignore
/// define_classes! {
///     IPS::IPS_OPT_IN_SERVICE = "IPS_OptInService" {
///         "StartOptIn", "CancelOptIn", "SendOptInCode",
///     }
///
///     // Classe sans méthode (Get/Enumerate/Pull/Delete uniquement)
///     AMT::AMT_GENERAL_SETTINGS = "AMT_GeneralSettings"
/// }
/// ```
#[macro_export]
macro_rules! define_classes {
    (
        $(
            $family:ident :: $const_name:ident = $class_name:literal
            $( { $($method:literal),* $(,)? } )?
        )*
    ) => {
        $(
            pub const $const_name: &str = $class_name;
        )*

        /// Catalogue complet des classes déclarées dans ce module
        pub fn catalog() -> Vec<$crate::registry::ClassDef> {
            vec![
                $(
                    $crate::registry::ClassDef::from_static(
                        $class_name,
                        &$crate::registry::$family,
                        &[$($($method),*)?],
                    ),
                )*
            ]
        }
    };
}

//! Static suggestion catalog: canonical emotions with Turkish variant texts,
//! category assignments, per-label one-line fallbacks, and the final generic
//! fallback.

/// Canonical emotions and multiple suggestion variants per emotion.
pub const SUGGESTIONS: &[(&str, &[&str])] = &[
    ("joy", &[
        "Mutluluğunuzu paylaşın: minnettar olduğunuz 3 şeyi yazın ve yakınınızla paylaşın.",
        "Gününüze küçük bir kutlama ekleyin: sevdiğiniz bir tatlıyı yiyin veya sevdiklerinizle paylaşın.",
        "Bugünün en güzel anını yazın ve neden önemli olduğunu 2 cümleyle açıklayın.",
        "Kendinize küçük bir armağan verin: 10 dakikalık favori aktivitenize zaman ayırın.",
    ]),
    ("sadness", &[
        "Hafif bir egzersiz yapın, sevdiğiniz bir şarkıyı dinleyin ve duygularınızı bir günlükte ifade edin.",
        "Nazik bir öz-şefkat pratiği yapın: kendinize iyi davranan 3 cümle yazın.",
        "Güvendiğiniz biriyle 10 dakikalık bir sohbet planlayın.",
        "Duygunuzu isimlendirin ve bedendeki yerini fark edin; 2 dakika nefese odaklanın.",
    ]),
    ("anger", &[
        "10 derin nefes alın, kısa bir yürüyüş yapın ve düşüncelerinizi yeniden çerçevelemeyi deneyin.",
        "Öfkeyi güvenli bir yere yönlendirin: 5 dakikalık serbest yazım, sonra kağıdı sakince kapatın.",
        "Vücuttaki gerginliği atmak için 30 saniyelik hızlı sallanma/gerinme yapın.",
        "Öfkenin ihtiyacını sorun: korunma mı, sınır mı? 1 net adım belirleyin.",
    ]),
    ("fear", &[
        "Nefese odaklı 4-7-8 tekniğini deneyin ve kaygılarınızı küçük adımlara bölün.",
        "Korkunuzu 3 parçaya ayırın ve her biri için 1 küçük adım planlayın.",
        "En kötü senaryoyu yazın, sonra olası ve yönetilebilir senaryoyu belirleyin.",
    ]),
    ("love", &[
        "Sevdiğiniz kişiye takdir mesajı gönderin veya küçük bir jest yapın.",
        "Kendinize sevgi dolu bir not yazın: bugün neyi iyi yaptınız?",
        "Yakınınızla 10 dakikalık kaliteli sohbet planlayın.",
    ]),
    ("surprise", &[
        "Beklenmedik durumu fırsata çevirin: ne öğrendiniz, üç cümlede yazın.",
        "Hoş sürprizi paylaşın veya küçük bir anı defterinize not edin.",
        "Şaşkınlık hissini meraka dönüştürün: 'Bundan ne öğrenebilirim?'",
    ]),
    ("neutral", &[
        "Gün içinde 5 dakikalık mindful mola verin ve vücut taraması yapın.",
        "Bugün için tek bir küçük hedef seçin ve bitirince kendinizi tebrik edin.",
        "Nötr enerjiyle basit bir işi bitirin (evi toplama, kısa dosyalama).",
    ]),
    ("uncertain", &[
        "Duygunuzu adlandırmak zor olabilir. 3 nefes alın ve 'Şu an bedende ne hissediyorum?' sorusunu yazın.",
        "Duygunuza bir ad veremiyorsanız sorun değil. Kısa bir yürüyüş yapın, sonra 3 kelimeyle özetlemeyi deneyin.",
        "Bir dakika durun, not alın: Ne oldu? Ne hissediyorum? Ne istiyorum? Küçük bir adım seçin.",
    ]),
    ("anxiety", &[
        "5 dakika nefes egzersizi yapın ve kaygınızı 1-10 arasında puanlayıp değişimi not edin.",
        "Endişe düşüncesine 'dur' deyin ve dikkati duyulara getirin (5-4-3-2-1).",
        "Zihinsel çiğneme yerine hareket: 2 dakikalık tempolu yürüyüş yapın.",
    ]),
    ("stress", &[
        "Boyun ve omuzlarınıza masaj yapın veya esneme hareketleri yapın.",
        "Pomodoro tekniğiyle 25 dakika odaklanın, 5 dakika dinlenin.",
        "Günlük stres kaynağını yazın ve 1 azaltıcı mikro adım belirleyin.",
    ]),
    ("loneliness", &[
        "Bir arkadaşınıza mesaj atın veya çevrim içi bir toplulukta sohbet edin.",
        "Kısa bir görüntülü arama planlayın veya bir yürüyüşe davet edin.",
    ]),
    ("burnout", &[
        "Bugün mutlaka 1 saatlik bir dinlenme molası planlayın ve işten uzak durun.",
        "Yükü azaltmak için devredeceğiniz 1 görevi seçin.",
        "Enerji envanteri yapın: dolduran/boşaltan 3 şey yazın ve 1 değiştirin.",
    ]),
    ("gratitude", &[
        "Bugün teşekkür etmek istediğiniz bir kişiyi arayın veya mesaj atın.",
        "Minnettar olduğunuz 3 şeyi yazın ve birini paylaşın.",
    ]),
    ("hope", &[
        "Gelecek için umut dolu bir hayali defterinize yazın ve küçük bir adım atın.",
        "Umutlu olduğunuz 3 şeyi yazın; biri için mikro adım planlayın.",
    ]),
    ("curiosity", &[
        "Merak ettiğiniz bir konuyu 15 dakika araştırın ve öğrendiklerinizi 3 maddeyle özetleyin.",
        "Bugün yeni bir 'neden?' sorusu yazın ve izi sürün.",
    ]),
    ("boredom", &[
        "Yeni bir hobi hakkında 10 dakikalık araştırma yapın ve ilk adımı atın.",
        "Rutin kırıcı 10 dakikalık 'deneysel' görev seçin.",
    ]),
    ("panic", &[
        "4-4-4-4 kutu nefes tekniği: 4 say nefes al, tut, ver, bekle.",
        "Topraklama: 5 şey gör, 4 şey hisset, 3 şey duy, 2 şey kokla, 1 şey tat.",
    ]),
    ("grief", &[
        "Yasınızı onurlandırın: kaybettiğiniz şey hakkında 5 dakika yazın.",
        "Duyguyu dalga gibi kabul edin; dayanma penceresi için nefes alın.",
    ]),
    ("optimism", &[
        "Bugün için ulaşılabilir tek bir hedef belirleyin ve tamamlayınca kendinizi ödüllendirin.",
        "Yarın için umut veren 1 küçük plan yazın.",
    ]),
];

const CATEGORIES: &[(&str, &str)] = &[
    ("joy", "basic"),
    ("sadness", "basic"),
    ("anger", "basic"),
    ("fear", "basic"),
    ("love", "basic"),
    ("surprise", "basic"),
    ("neutral", "basic"),
    ("uncertain", "other"),
    ("anxiety", "negative"),
    ("stress", "negative"),
    ("loneliness", "negative"),
    ("boredom", "negative"),
    ("panic", "negative"),
    ("burnout", "complex"),
    ("grief", "complex"),
    ("gratitude", "positive"),
    ("hope", "positive"),
    ("optimism", "positive"),
    ("curiosity", "explore"),
];

pub fn category_for(emotion: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, c)| *c)
        .unwrap_or("other")
}

/// One-line fallbacks used when no stored record carries a usable text.
const SUGGESTION_FALLBACKS: &[(&str, &str)] = &[
    ("joy", "Mutluluğunuzu paylaşın: minnettar olduğunuz 3 şeyi yazın ve yakınınızla paylaşın."),
    ("sadness", "Hafif bir egzersiz yapın, sevdiğiniz bir şarkıyı dinleyin ve duygularınızı bir günlükte ifade edin."),
    ("anger", "10 derin nefes alın, kısa bir yürüyüş yapın ve düşüncelerinizi yeniden çerçevelemeyi deneyin."),
    ("fear", "4-7-8 nefes tekniğini deneyin ve kaygınızı küçük adımlara bölün."),
    ("disgust", "Hoşnutsuzluğun kaynağını yazın ve uzaklaşmak yerine küçük bir iyileştirme adımı belirleyin."),
    ("surprise", "Beklenmedik durumdan ne öğrendiniz? 3 maddeyle not alın ve bir fırsat belirleyin."),
    ("neutral", "5 dakikalık mindful mola verin ve vücut taraması yapın."),
];

pub fn fallback_for(emotion: &str) -> Option<&'static str> {
    SUGGESTION_FALLBACKS
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, text)| *text)
}

/// The last resort when every other lookup produced nothing usable.
pub const GENERIC_FALLBACK: &str =
    "Kendinize iyi davranın: kısa bir yürüyüş, derin nefes ve güvendiğiniz biriyle sohbet iyi gelebilir.";

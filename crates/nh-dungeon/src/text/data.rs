//! Built-in text, padded to the data file width and stored encrypted.

pub(super) const RUMORS_TRUE: &[&[u8]] = &[
    b"@\"fdyofbg|e\"gi~!`a(fdp}(ergb}|!kb(inw#zu!vaduqcp`yb,[WO^][WO",
    b"@\"gi~ena(yr\"e(cnwvku!mb(|hel|>^][WO^][WO^][WO^][WO^][WO^][WO",
    b"@\"gzirved0qne|u!oea|!umd|!lk|0sww|>^][WO^][WO^][WO^][WO^][WO",
    b"@\"`zqfmj(yr\"n}cu\"e(cocom0uje|0`va(q!qgz\x7fmn$gv!dmzu/][WO^][WO",
    b"@\"bithlc(snpvatnp$m~mkc`ddlw(inwv(yoqmoxu,[WO^][WO^][WO^][WO",
    b"@\"cd\x7fvkjo0qmpa\x7fo\"m{0umk(xnv$|\x7f!fva~j,[WO^][WO^][WO^][WO^][WO",
    b"@\"cg\x7fe\"eeemgp(}`{$xbnvakd!{k}0`eea~rv$oe`p`{>^][WO^][WO^][WO",
    b"@\"haj`p`(snpt{u!kw(q!ekgt!vla~f\"pg0uwvf0tl`mqe,[WO^][WO^][WO",
    b"@\"hg~f\"sgbl\"gi~!`a(tddmfue\"vmstpwafdn}&O^][WO^][WO^][WO^][WO",
    b"@\"jq}qj$c~nuw(xnu$|\x7f!wjd\x7fbi$kx`kj{>^][WO^][WO^][WO^][WO^][WO",
    b"@\"tgdhmj(\x7fg\"fdyofjmcr\"hmdr\"}ge!qam0hlrach`hm0ujmfwr,[WO^][WO",
    b"@\"tzydqp(s`l$ouu\"p`u!eklc!vk(|hqpm~!ge{ym{*WO^][WO^][WO^][WO",
    b"@\"va~f\"kn0bmjn|hap(yr\"e(r`f$|xhlc(yg\"p`usg$ac!c$fesqa(~dcvji/",
    b"@\"w`\x7fsv${gnp`(yr\"jgd!cw(wnm`(qr\"e(|nlc(cvmvl>^][WO^][WO^][WO",
    b"@\"wxumnfg\x7fj\"m{0omp(q!qk}bbg$gv!nmoxu,[WO^][WO^][WO^][WO^][WO",
    b"@\"p`bnuj(t`ecmb!kw(tdc`dydp$|x`l$i0vkadtdf$g~d,[WO^][WO^][WO",
    b"@nsiir\"fm0`uezu!mb(dig$xx`qa(\x7fg\"p`u!okg~/][WO^][WO^][WO^][WO",
    b"@nsiir\"w\x7fudr$|xd\"bd\x7fnp$jugmvm0dlczqwkjo0hotgbucj|0lgw{qfgw&O",
    b"@oqduuq$ibd\"libe\"pg0lcom>!\"A~uo\"bgb!c$\x7fqof$gv!um{xhlc&O^][WO",
    b"Cg$kqsgb}|!ulm~!ge|yoe$jquq*WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Cg$kqsgb}|!ulm~!ge|yoe${qmcii~egv{>^][WO^][WO^][WO^][WO^][WO",
    b"Cgsibd\"kn0uja(`nvmg~!mb(~hvvgwm{gmbhl$%=!kp/c!lk|0gmv(dig$\x7fu`i*",
    b"Ekc(vnp$~ybvkzi!jazu/][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ekcoyoe$l\x7fvl$ac!c$o\x7fnf$\x7fqx\"pg0dqgi`d,[WO^][WO^][WO^][WO^][WO",
    b"Dnrm~!ahgqjq$eqjg$q\x7ft\"mffhqmj|d\"pg0lmw|0lmj{ddpw&O^][WO^][WO",
    b"Dlczqwg$M|cgvmdi\"pg0raezu!ok{d!okfcugv{0`ueq>^][WO^][WO^][WO",
    b"Dcp(inwv(s`pvgdr,$(Dig}/bd\"cg\x7fe\"bgb!{k}b!g}mc/][WO^][WO^][WO",
    b"Gmqfd`kj{0`pa(q!pmkx!qk}bbg$gv!l}e`iq*WO^][WO^][WO^][WO^][WO",
    b"Fjk{dr\"edg`{w(ulrpq0uja(vsk`ou/][WO^][WO^][WO^][WO^][WO^][WO",
    b"Jgax0xmqz0`pigbr\"e\x7fqx\"bz\x7fl\"v}cu,[WO^][WO^][WO^][WO^][WO^][WO",
    b"Mgtzubje}~r\"latd\"p`uhp$o\x7fmf$a~!c${ubpa|0smke>^][WO^][WO^][WO",
    b"Ogrmb!dmoxu\"e(}nlw|us8$q\x7ft\"iawiv$ouu\"oa|mg`&O^][WO^][WO^][WO",
    b"Rjkx{dgtmbr\"eksdrp(ssg`ad!aeztr.$ic!nkfw!cw(inw$xqx\"gici,[WO",
    b"Uja(_scgdu!ijggr\"igbd\"p`qo\"w`u!vad|r,[WO^][WO^][WO^][WO^][WO",
];

pub(super) const RUMORS_FALSE: &[&[u8]] = &[
    b"#Qk(gigj(Y!fmm<!vlm0gkv{d!vla~f\"M(ghnh(cdg$a~!jaifdl$ac!c${snpa(|hqp72",
    b"0qp(\\`u$gv!Jek{hlc20mge~yoe$ac!oqkx!okzu!fmnvhaqdd!vli~!gj|uskjo>",
    b"@\"g`qlghm\x7fo\"meyucpa~f\"e(`nqpeqo\"knddl$lumkrmbr\"wkbnnh{0nd$nysg*",
    b"@\"g`qlghm\x7fo\"meyucpa~f\"e(tsccg~!mb|uo\"`m|htazc!qgz\x7fmnw(\x7fg\"babd,",
    b"@\"`zqfmj/c!jait!kw(qmueqc!cp(dig$m~e\"kn0hvw(~dao&O^][WO^][WO",
    b"@\"cf\x7flg#{0hlrm~umvq0hq$i|vc}{0gwhd0nd$oulq*WO^][WO^][WO^][WO",
    b"@\"cg\x7fe\"sii!vk(}`ia(}nlaq0hq$|\x7f!pkj0`\"w`\x7fqiam`dp*WO^][WO^][WO",
    b"@\"lg}tlg}|tq$\x7f\x7ftn`f7u\"si~u\"pg0iwv|0`\"saj`p`&O^][WO^][WO^][WO",
    b"@\"n}wfnaz0hq$i0lmj{ddp$|x`v$`qofhmc!oefi!feowdpw&O^][WO^][WO",
    b"@\"iiwha$~\x7flkp(`tot(snwhl0cg$}cddqd0gmv(wnwveqofw&O^][WO^][WO",
    b"@\"jq}qj$\x7fymn$ju!tazi!evidddqd0hd$q\x7ft\"vmcbwa(xdp*WO^][WO^][WO",
    b"@\"va~f\"kn0`fkz~lgj|0qpk|ubvw(qfcmfcu\"gg|e,[WO^][WO^][WO^][WO",
    b"@\"wg|ekaz0vkhd0nlhq0rch}dd\"lac!qqxuskkzc/][WO^][WO^][WO^][WO",
    b"@nh(}nlw|usq$ibd\"gzu`val0dtmd<!`q|0rmim0`pa(}npa(uwkh(dicj(\x7fujazc/",
    b"@nsiir\"vmqe\"p`u!qgz\x7fmn$gv!cifurke(dvkgm>^][WO^][WO^][WO^][WO",
    b"@vpisj\"hg~f\"sgblq$nbno$|xd\"vmqs\")%0uje|0hq${\x7f!oqkx!qenus#[WO",
    b"Cg$kqsgb}|!ulm~!{k}0qpeq*!\"}ge!omoxu\"cmd!qpzebi$ji!nmoxulmfw/",
    b"Cnmftogw{0hq$i0vc}(dn\"e~\x7fhf$juhlc(`dvvavhg`(rx\"e(snaoidskgm>",
    b"Dnfmbdvl(x`q$f\x7f!gbnubv$g~!vlm0Lkjgd`wv&O^][WO^][WO^][WO^][WO",
    b"Dtazinla({oms{0uje|0`nh(tvcv~ur\"ezu!jk{dhna&O^][WO^][WO^][WO",
    b"Fmhl0hq$`u`t}&O^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ikp|yoe$i0gnkidhlc(uxg$ac!c$o\x7fnf$\x7fqx\"pg0fcmf0mgrm|r,[WO^][WO",
    b"Hd$q\x7ft\"wmu!l}e`iq$k\x7flkjo<!jmlu!{k}b!tede``hmc/][WO^][WO^][WO",
    b"Hv#{0omp(q!`qo<!kp/c!c$nu`vqzu/][WO^][WO^][WO^][WO^][WO^][WO",
    b"O{ixxr\"ezu!vlm0nlhq0lmj{ddpw(dicp(s`l${ddch(inwv(qlwhmd/][WO",
    b"Uja(Womiaci\"Ia~dq$ibd\"e(c`da(`mcgm0gmv(q!`aoyolaz>^][WO^][WO",
    b"Uja(|drvmsicqf7r\"cg|e\"p}boq$a~um$du`f$av!{k}0mge~u!vlm0mgrm|/",
    b"Wcixysgw(qsg$~us{$xqsvmkemcv(qcmq|0ujaab!defwr,[WO^][WO^][WO",
    b"Xmq(s`l#|0gkp(q!`k}|egv(yo\"e(r`e$gv!jkdthlc&O^][WO^][WO^][WO",
    b"Xmq(}`{$ouu\"vasi\"wm|mkjo0mgp|usq$gv!pak\x7floaft`vmg~/][WO^][WO",
];

pub(super) const EPITAPHS: &[&[u8]] = &[
    b"Sgw|0hl$xu`aaWO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"S,M&@/][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Sgw|0Hl$Xydaa{O^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ompm0,/$|xdpa(qsg$F_!tede``hm0hvaec!kj(dikw(wscrmO^][WO^][WO",
    b"0;=<=0;==>!Vlm0Mmjourv)Dywg`(X`aomb!Grmb^][WO^][WO^][WO^][WO",
    b"Uja(Wscrm0nd$|xd\"Qf{omsf0Icgcus][WO^][WO^][WO^][WO^][WO^][WO",
    b"Vg$\x7fusgj/d!qqzu!ulg0ujm{0vcw$0cwp(gd\"f}bhg`(xho$`usg$i~xueqO",
    b"Rrez{x\")%0ig$\x7fqr\"e(fdp}(wnm`(tne[WO^][WO^][WO^][WO^][WO^][WO",
    b"Cgsibd\"kn0Dnakdskg(Dikvl0ScmdO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Lc`m0hl$\\qhuefO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ne$nbhgjl>!Mc(wnm`(ttfa&0Ne$lydf*(_f\"jgg!dkgt^][WO^][WO^][WO",
    b"Cga||dhqasd\"Fmuunabehaa(Rdgpdukwmku^][WO^][WO^][WO^][WO^][WO",
    b"Mmkc0nwp(rdnk\x7f1^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Qnaicd\"`g~&v$lyf\"im0tr*(Y&o$xusdakdm{$`qqr}(tnuj(xdpa&0,/$Zurk`m~u",
    b"Qmw|}`l((`mge{u!lk|u!dkzg`p`a~f\"eltsgw{*!Ea`uolke<!Cwe\x7fegq{7r\"Bgbupa{c-\"bavuj$dulwvm0nl$|xd\"hmvu",
    b"Lcvq0ic`(q!nm|dmg$dql`+Adr\"bdudaa(g`q$\x7fxhva(qr\"wf\x7fv-S`uo\"Iibx\"sic!kj(dsmqj|d-P`u!neer!ue{0gkv{d!vk(wn",
    b"Cg$kqsgb}|-\"kz0ujm{0bmqdt!jex`dl$|\x7f!{k}1^][WO^][WO^][WO^][WO",
    b"Rmkf0xmq/|m\"ngyo\"p`yr\"bm|mms(yo\"lm|m#$%=!vlm0Vk~ibe\"kn0Xgjl\x7fs",
    b"Bcq|ynl%(Dikw(wscrm0bmj|qhlw(dnzmk0vcw|u^][WO^][WO^][WO^][WO",
    b"Rwi(atm`(uskwWO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Igvm0mka{0`l$Idigm{d-\"ed|!fvmcrg`(eq\"eft!lk(`mcgm0um$o\x7f^][WO",
    b"Igvm0mka{0Dxacydn((qfg$9 3,$(Dig$o\x7fnf$lyd\"}geoe*WO^][WO^][WO",
    b"Igvm0mka{0l{$\x7fygg>(Xdpa(|dv$`us\"hau \"Jgg!qlm7r\"e|0sgw|0`l`(cn\"ee0H,",
    b"Igvm0mka{0Kmlf~x\"]mqrv*(@`p`g~!oa(vnp$f\x7fu\"vachlc&O^][WO^][WO",
    b"Ig$i|vc}{0mkal0vjmdu!mj(dig$mqsvl(qof$f\x7fv\"lm7r\"hqyoe$a~!kpWO",
    b"H\"iitd\"ef0`ql(\x7fg\"iqcdnbWO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Rmkf0sktm>!Qkg~!pk|ddl*(Cnmj(wnla&0Cwp(~nv$n\x7fsek|ddl*WO^][WO",
    b"Igvm0mka{0uja(rnf}(\x7fg\"Ng~`vli~!@hi{d,$[ddrtmt!mj(dig$oqr\"mfcugel0nd$|xd\"fzqjg*",
    b"Fm$ig`{%WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
];

pub(super) const ENGRAVINGS: &[&[u8]] = &[
    b"DnfmbdvlWO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Wnel0vcw(xdpaWO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"`f$iuscvael][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Nuhjbdcp`O^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"FchitskadO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Jkhz\x7fx\"sic!jazu^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"@,W&0,<[WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"=/$I>R,[WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Xmq(gnl#|0fgp(yu\"qx0uja(cugt{O^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Mcwky`va(\x7fflm(cqgvi~{c$g0wmm(si%afdscpm>^][WO^][WO^][WO^][WO",
    b"Vghd0BmimO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Vg$i`nnkoy{g$n\x7fs\"p`u!kjk\x7fotafydlgm>^][WO^][WO^][WO^][WO^][WO",
    b"Rga(inw$fuyv$_uela{t`{[WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"ompibx\"wgz`i[WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Gmv(q!ekgt!vmeu!aed|!:;?=4141O^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Qnaicd\"`g~&v$nudf$|xd\"efylch{>^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Lc`i}-\"mf0Dfaf<!K#e0@fee>^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Uuk(diwijc!wt)O^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ighd\x7f-\"Sgbmf%WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Xmq/fd\"cgd!oea| ][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"@q$av ][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Y\"iibjq$|xd\"wx\x7fu][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Ikg(ctlp(tscgg~dq[WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Jneidt\"fib`fe(~hipgO^][WO^][WO^][WO^][WO^][WO^][WO^][WO^][WO",
    b"Omp`yoe$|\x7f!qam0igvm<!ok~u!chg~f][WO^][WO^][WO^][WO^][WO^][WO",
];
